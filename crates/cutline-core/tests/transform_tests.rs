use cutline_core::config::EditorConfig;
use cutline_core::timeline::TrackKind;
use cutline_core::transform::*;
use cutline_test_harness::assertions::assert_approx;
use cutline_test_harness::builders::{ClipBuilder, TimelineBuilder};
use uuid::Uuid;

fn viewport(width: f64) -> Viewport {
    Viewport::new(&EditorConfig::default(), width)
}

#[test]
fn test_pixels_per_second_doubles_per_zoom_step() {
    assert_eq!(pixels_per_second(20.0, 0.0), 20.0);
    assert_eq!(pixels_per_second(20.0, 1.0), 40.0);
    assert_eq!(pixels_per_second(20.0, 3.0), 160.0);
}

#[test]
fn test_zoom_is_clamped() {
    let mut vp = viewport(800.0);
    vp.set_zoom(10.0);
    assert_eq!(vp.zoom(), 6.0);
    vp.set_zoom(-1.0);
    assert_eq!(vp.zoom(), 0.0);
}

#[test]
fn test_tick_interval_grows_as_scale_shrinks() {
    let scales = [200.0, 100.0, 50.0, 20.0, 8.0, 4.0, 2.0];
    let intervals: Vec<f64> = scales.iter().map(|pps| major_tick_interval(*pps)).collect();
    assert_eq!(intervals, vec![1.0, 2.0, 5.0, 10.0, 20.0, 30.0, 60.0]);
    assert!(intervals.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_ticks_cover_padded_window() {
    let vp = viewport(800.0);
    let ticks: Vec<Tick> = vp.ticks().collect();

    assert_eq!(ticks.len(), 7);
    assert_eq!(ticks[0].label, "0s");
    assert_eq!(ticks[6].label, "1:00");
    for tick in &ticks {
        assert_approx(tick.x, tick.time * 20.0);
    }
}

#[test]
fn test_ticks_start_inside_left_pad_when_scrolled() {
    let mut vp = viewport(800.0);
    vp.set_scroll_x(1000.0);
    let first = vp.ticks().next().unwrap();
    // (1000 - 400) / 20 = 30 s is the first tick time on a 10 s grid.
    assert_eq!(first.time, 30.0);
}

#[test]
fn test_auto_extend_in_whole_chunks() {
    let mut vp = viewport(800.0);
    assert_eq!(vp.total_seconds(), 60.0);

    vp.set_scroll_x(10_000.0);

    assert_eq!(vp.total_seconds(), 600.0);
    assert_eq!(vp.total_seconds() % EXTEND_CHUNK_SECS, 0.0);
    assert_eq!(vp.scroll_x(), 10_000.0);
    let remaining = vp.content_width() - (vp.scroll_x() + vp.viewport_width);
    assert!(remaining >= EXTEND_MIN_THRESHOLD_PX);
}

#[test]
fn test_auto_extend_never_shrinks() {
    let mut vp = viewport(800.0);
    vp.set_scroll_x(5_000.0);
    let grown = vp.total_seconds();
    vp.set_scroll_x(0.0);
    vp.set_zoom(3.0);
    vp.set_zoom(0.0);
    assert!(vp.total_seconds() >= grown);
}

#[test]
fn test_ensure_covers_rounds_up_to_chunk() {
    let mut vp = viewport(800.0);
    vp.ensure_covers(61.0);
    assert_eq!(vp.total_seconds(), 120.0);
    vp.ensure_covers(30.0);
    assert_eq!(vp.total_seconds(), 120.0);
}

#[test]
fn test_pointer_to_seconds_accounts_for_scroll() {
    let mut vp = viewport(800.0);
    vp.set_scroll_x(100.0);
    assert_approx(vp.pointer_to_seconds(60.0), 8.0);
    vp.set_scroll_x(0.0);
    assert_eq!(vp.pointer_to_seconds(-40.0), 0.0);
}

#[test]
fn test_track_layouts_in_start_order() {
    let media = Uuid::new_v4();
    let late = ClipBuilder::new(media).at(5.0).duration_secs(1.0).build();
    let early = ClipBuilder::new(media).at(2.0).duration_secs(3.0).build();
    let early_id = early.id;
    let timeline = TimelineBuilder::new()
        .with_clip(TrackKind::VideoA, late)
        .with_clip(TrackKind::VideoA, early)
        .build();

    let layouts = track_layouts(&timeline, 20.0);

    assert_eq!(layouts.len(), 4);
    let v1 = &layouts[0];
    assert_eq!(v1.kind, TrackKind::VideoA);
    assert_eq!(v1.clips[0].clip_id, early_id);
    assert_approx(v1.clips[0].left, 40.0);
    assert_approx(v1.clips[0].width, 60.0);
    assert_approx(v1.clips[1].left, 100.0);
}

#[test]
fn test_apply_sets_zoom_before_scroll() {
    let mut vp = viewport(800.0);
    vp.apply(&ViewUpdate {
        zoom: Some(2.0),
        scroll_x: Some(3_000.0),
        scroll_y: None,
    });
    assert_eq!(vp.zoom(), 2.0);
    assert_eq!(vp.scroll_x(), 3_000.0);
}
