use cutline_core::timeline::{MIN_CLIP_DURATION, Timeline, TrackKind};

const TOLERANCE: f64 = 1e-6;

pub fn assert_approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "{actual} != expected {expected}"
    );
}

/// Assert that a track has a specific number of clips.
pub fn assert_track_clip_count(timeline: &Timeline, track: TrackKind, expected: usize) {
    let actual = timeline.track(track).len();
    assert_eq!(
        actual,
        expected,
        "track {} has {} clips, expected {}",
        track.label(),
        actual,
        expected
    );
}

/// Assert the start times on a track, in start order.
pub fn assert_start_times(timeline: &Timeline, track: TrackKind, expected: &[f64]) {
    let starts: Vec<f64> = timeline
        .track(track)
        .sorted_clips()
        .iter()
        .map(|c| c.start_time)
        .collect();
    assert_eq!(
        starts.len(),
        expected.len(),
        "track {} starts {:?}, expected {:?}",
        track.label(),
        starts,
        expected
    );
    for (actual, want) in starts.iter().zip(expected) {
        assert!(
            (actual - want).abs() < TOLERANCE,
            "track {} starts {:?}, expected {:?}",
            track.label(),
            starts,
            expected
        );
    }
}

/// Assert that no clips overlap on a given track.
pub fn assert_no_overlaps(timeline: &Timeline, track: TrackKind) {
    let sorted = timeline.track(track).sorted_clips();
    for pair in sorted.windows(2) {
        assert!(
            pair[0].end_time() <= pair[1].start_time + TOLERANCE,
            "clips {:?} and {:?} overlap on track {}",
            pair[0].id,
            pair[1].id,
            track.label()
        );
    }
}

/// Assert that every clip on every track satisfies the clip invariants.
pub fn assert_clip_invariants(timeline: &Timeline) {
    for (track, clip) in timeline.clips() {
        assert!(
            clip.start_time >= 0.0,
            "clip {:?} on {} starts before zero: {}",
            clip.id,
            track.label(),
            clip.start_time
        );
        assert!(
            clip.duration >= MIN_CLIP_DURATION - TOLERANCE,
            "clip {:?} on {} is shorter than the minimum: {}",
            clip.id,
            track.label(),
            clip.duration
        );
        assert!(
            clip.in_point >= 0.0,
            "clip {:?} has negative in point {}",
            clip.id,
            clip.in_point
        );
        assert!(
            (clip.out_point - (clip.in_point + clip.duration)).abs() < TOLERANCE,
            "clip {:?} out {} != in {} + duration {}",
            clip.id,
            clip.out_point,
            clip.in_point,
            clip.duration
        );
    }
}
