use cutline_core::playback::PlaybackClock;
use cutline_test_harness::assertions::assert_approx;

#[test]
fn test_default_clock() {
    let clock = PlaybackClock::default();
    assert!(!clock.is_playing());
    assert_eq!(clock.current_time(), 0.0);
    assert_eq!(clock.duration(), 30.0);
}

#[test]
fn test_tick_only_while_playing() {
    let mut clock = PlaybackClock::new(10.0);
    clock.tick(1.0);
    assert_eq!(clock.current_time(), 0.0);

    clock.play();
    clock.tick(0.5);
    clock.tick(0.25);
    assert_approx(clock.current_time(), 0.75);
}

#[test]
fn test_stops_at_duration() {
    let mut clock = PlaybackClock::new(2.0);
    clock.seek(1.9);
    assert!(clock.toggle());
    clock.tick(0.5);
    assert_eq!(clock.current_time(), 2.0);
    assert!(!clock.is_playing());
}

#[test]
fn test_seek_floors_at_zero() {
    let mut clock = PlaybackClock::new(5.0);
    clock.seek(-3.0);
    assert_eq!(clock.current_time(), 0.0);
    clock.pause();
    assert!(!clock.is_playing());
}
