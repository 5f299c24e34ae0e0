use cutline_core::error::CoreError;
use cutline_core::timeline::{MIN_CLIP_DURATION, TrackKind};
use cutline_core::trim::*;
use cutline_test_harness::assertions::*;
use cutline_test_harness::builders::{ClipBuilder, TimelineBuilder};
use cutline_test_harness::fixtures::linked_av_timeline;
use uuid::Uuid;

#[test]
fn test_left_drag_recomputes_from_snapshot() {
    let clip = ClipBuilder::new(Uuid::new_v4())
        .at(2.0)
        .in_point(1.0)
        .duration_secs(4.0)
        .build();
    let clip_id = clip.id;
    let mut timeline = TimelineBuilder::new()
        .with_clip(TrackKind::VideoA, clip)
        .build();

    let drag = TrimDrag::begin(&timeline, TrackKind::VideoA, clip_id, TrimEdge::Start).unwrap();
    timeline.update_clip(TrackKind::VideoA, clip_id, &drag.update(-50.0, 100.0));
    let (_, clip) = timeline.find_clip(clip_id).unwrap();
    assert_approx(clip.start_time, 1.5);
    assert_approx(clip.in_point, 0.5);
    assert_approx(clip.duration, 4.5);
    assert_approx(clip.out_point, 5.0);

    // Further than the in point allows: clamps at in = 0.
    timeline.update_clip(TrackKind::VideoA, clip_id, &drag.update(-300.0, 100.0));
    let (_, clip) = timeline.find_clip(clip_id).unwrap();
    assert_approx(clip.start_time, 1.0);
    assert_approx(clip.in_point, 0.0);
    assert_approx(clip.duration, 5.0);
    assert_clip_invariants(&timeline);
}

#[test]
fn test_left_trim_clamps_at_timeline_start() {
    let clip = ClipBuilder::new(Uuid::new_v4())
        .at(0.5)
        .in_point(3.0)
        .duration_secs(2.0)
        .build();

    let patch = trim_left(&clip, -2.0);

    assert_eq!(patch.start_time, Some(0.0));
    assert_approx(patch.in_point.unwrap(), 2.5);
    assert_approx(patch.duration.unwrap(), 2.5);
    assert_approx(patch.out_point.unwrap(), 5.0);
}

#[test]
fn test_right_drag_floors_duration() {
    let (mut timeline, ids) = linked_av_timeline();
    let drag = TrimDrag::begin(&timeline, TrackKind::VideoA, ids.video_id, TrimEdge::End).unwrap();

    timeline.update_clip(TrackKind::VideoA, ids.video_id, &drag.update(-10_000.0, 20.0));

    let (_, clip) = timeline.find_clip(ids.video_id).unwrap();
    assert_approx(clip.duration, MIN_CLIP_DURATION);
    assert_approx(clip.start_time, 2.0);
    assert_clip_invariants(&timeline);
}

#[test]
fn test_trim_does_not_touch_linked_clip() {
    let (mut timeline, ids) = linked_av_timeline();
    let drag = TrimDrag::begin(&timeline, TrackKind::VideoA, ids.video_id, TrimEdge::Start).unwrap();

    timeline.update_clip(TrackKind::VideoA, ids.video_id, &drag.update(20.0, 20.0));

    let (_, audio) = timeline.find_clip(ids.audio_id).unwrap();
    assert_eq!(audio.start_time, 2.0);
    assert_eq!(audio.duration, 4.0);
}

#[test]
fn test_begin_on_stale_clip_errors() {
    let (timeline, ids) = linked_av_timeline();
    let err = TrimDrag::begin(&timeline, TrackKind::VideoB, ids.video_id, TrimEdge::End).unwrap_err();
    assert!(matches!(err, CoreError::ClipNotFound(id) if id == ids.video_id));
}

#[test]
fn test_trim_start_to_playhead_only_hits_spanning_selection() {
    let (mut timeline, ids) = linked_av_timeline();
    let elsewhere = ClipBuilder::new(Uuid::new_v4()).at(10.0).duration_secs(2.0).build();
    let elsewhere_id = elsewhere.id;
    timeline.add_clip(TrackKind::VideoB, elsewhere);

    let patches = trim_start_to_playhead(&timeline, &[ids.video_id, elsewhere_id], 3.0);
    assert_eq!(patches.len(), 1);
    timeline.update_clips(patches);

    let (_, video) = timeline.find_clip(ids.video_id).unwrap();
    assert_approx(video.start_time, 3.0);
    assert_approx(video.in_point, 1.0);
    assert_approx(video.duration, 3.0);
    assert_approx(video.out_point, 4.0);
    assert_start_times(&timeline, TrackKind::VideoB, &[10.0]);
}

#[test]
fn test_trim_end_to_playhead() {
    let (mut timeline, ids) = linked_av_timeline();

    let patches = trim_end_to_playhead(&timeline, &[ids.audio_id], 5.0);
    timeline.update_clips(patches);

    let (_, audio) = timeline.find_clip(ids.audio_id).unwrap();
    assert_approx(audio.start_time, 2.0);
    assert_approx(audio.duration, 3.0);
    assert_approx(audio.out_point, audio.in_point + 3.0);
}

#[test]
fn test_playhead_on_end_edge_is_outside_clip() {
    let (timeline, ids) = linked_av_timeline();
    assert!(trim_end_to_playhead(&timeline, &[ids.video_id], 6.0).is_empty());
}
