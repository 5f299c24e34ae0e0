//! Edge trimming. Every function here produces a [`ClipPatch`]; applying it is
//! left to the store so trims stay pure and testable.

use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::timeline::{Clip, ClipPatch, MIN_CLIP_DURATION, Timeline, TrackKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimEdge {
    Start,
    End,
}

/// Move the start edge by `delta` seconds, keeping the end edge fixed.
///
/// The delta is clamped so start and in-point never go negative and the clip
/// never gets shorter than [`MIN_CLIP_DURATION`].
pub fn trim_left(clip: &Clip, delta: f64) -> ClipPatch {
    let lower = (-clip.start_time).max(-clip.in_point);
    let upper = (clip.duration - MIN_CLIP_DURATION).max(lower);
    let delta = delta.clamp(lower, upper);
    let in_point = clip.in_point + delta;
    let duration = clip.duration - delta;
    ClipPatch::default()
        .start_time(clip.start_time + delta)
        .in_point(in_point)
        .duration(duration)
        .out_point(in_point + duration)
}

/// Move the end edge by `delta` seconds.
pub fn trim_right(clip: &Clip, delta: f64) -> ClipPatch {
    let duration = (clip.duration + delta).max(MIN_CLIP_DURATION);
    ClipPatch::default()
        .duration(duration)
        .out_point(clip.in_point + duration)
}

pub fn trim(clip: &Clip, edge: TrimEdge, delta: f64) -> ClipPatch {
    match edge {
        TrimEdge::Start => trim_left(clip, delta),
        TrimEdge::End => trim_right(clip, delta),
    }
}

/// An in-progress edge drag.
///
/// Each update is computed from the clip as it was when the drag began, so
/// pointer jitter never accumulates.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimDrag {
    pub track: TrackKind,
    pub edge: TrimEdge,
    snapshot: Clip,
}

impl TrimDrag {
    pub fn begin(timeline: &Timeline, track: TrackKind, clip_id: Uuid, edge: TrimEdge) -> Result<Self> {
        let clip = timeline
            .track(track)
            .get_clip(clip_id)
            .ok_or(CoreError::ClipNotFound(clip_id))?;
        Ok(Self {
            track,
            edge,
            snapshot: clip.clone(),
        })
    }

    pub fn clip_id(&self) -> Uuid {
        self.snapshot.id
    }

    pub fn snapshot(&self) -> &Clip {
        &self.snapshot
    }

    /// Patch for a pointer that has moved `pointer_dx_px` since the drag began.
    pub fn update(&self, pointer_dx_px: f64, pixels_per_second: f64) -> ClipPatch {
        let delta = if pixels_per_second > 0.0 {
            pointer_dx_px / pixels_per_second
        } else {
            0.0
        };
        trim(&self.snapshot, self.edge, delta)
    }
}

fn trim_to_playhead<'a>(
    timeline: &Timeline,
    selected: impl IntoIterator<Item = &'a Uuid>,
    playhead: f64,
    edge: TrimEdge,
) -> Vec<(TrackKind, Uuid, ClipPatch)> {
    selected
        .into_iter()
        .filter_map(|id| timeline.find_clip(*id))
        .filter(|(_, clip)| clip.contains(playhead))
        .map(|(kind, clip)| {
            let delta = match edge {
                TrimEdge::Start => playhead - clip.start_time,
                TrimEdge::End => playhead - clip.end_time(),
            };
            (kind, clip.id, trim(clip, edge, delta))
        })
        .collect()
}

/// Patches moving the start of each selected clip under the playhead to it.
pub fn trim_start_to_playhead<'a>(
    timeline: &Timeline,
    selected: impl IntoIterator<Item = &'a Uuid>,
    playhead: f64,
) -> Vec<(TrackKind, Uuid, ClipPatch)> {
    trim_to_playhead(timeline, selected, playhead, TrimEdge::Start)
}

/// Patches moving the end of each selected clip under the playhead to it.
pub fn trim_end_to_playhead<'a>(
    timeline: &Timeline,
    selected: impl IntoIterator<Item = &'a Uuid>,
    playhead: f64,
) -> Vec<(TrackKind, Uuid, ClipPatch)> {
    trim_to_playhead(timeline, selected, playhead, TrimEdge::End)
}
