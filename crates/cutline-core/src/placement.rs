//! Drop/move resolution onto a target track under insert or overwrite.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::media::{MediaAsset, MediaKind};
use crate::snap::{self, SnapStrategy};
use crate::timeline::{Clip, Timeline, TrackKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DropMode {
    /// Ripple later clips out of the way.
    Insert,
    /// Remove whatever the dropped clip lands on.
    #[default]
    Overwrite,
}

/// What is being dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum DropSource {
    /// A clip already on the timeline being dragged.
    Existing { clip_id: Uuid, from_track: TrackKind },
    /// An imported asset dragged in from the media browser.
    Asset(MediaAsset),
    /// A serialized asset from the drag-and-drop transport.
    Payload(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropRequest {
    pub source: DropSource,
    pub target_track: TrackKind,
    /// Pointer x in viewport pixels.
    pub pointer_x: f64,
    /// Distance from the clip's left edge to where it was grabbed.
    pub drag_offset_x: f64,
    /// Insert regardless of the current drop mode.
    pub force_insert: bool,
    pub no_snap: bool,
}

impl DropRequest {
    pub fn new(source: DropSource, target_track: TrackKind, pointer_x: f64) -> Self {
        Self {
            source,
            target_track,
            pointer_x,
            drag_offset_x: 0.0,
            force_insert: false,
            no_snap: false,
        }
    }

    pub fn drag_offset(mut self, offset_px: f64) -> Self {
        self.drag_offset_x = offset_px;
        self
    }

    pub fn force_insert(mut self) -> Self {
        self.force_insert = true;
        self
    }

    pub fn no_snap(mut self) -> Self {
        self.no_snap = true;
        self
    }
}

/// View and mode state the placement engine reads but never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementContext {
    pub scroll_x: f64,
    pub pixels_per_second: f64,
    pub drop_mode: DropMode,
    pub snapping_enabled: bool,
    pub strategy: SnapStrategy,
    /// Major tick times offered as proximity snap targets.
    pub ticks: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    ClipNotFound,
    IncompatibleTrack,
    MalformedPayload,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementOutcome {
    Placed {
        clip_id: Uuid,
        track: TrackKind,
        start_time: f64,
    },
    Ignored(IgnoreReason),
}

impl PlacementOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, PlacementOutcome::Placed { .. })
    }

    pub fn placed_clip(&self) -> Option<Uuid> {
        match self {
            PlacementOutcome::Placed { clip_id, .. } => Some(*clip_id),
            PlacementOutcome::Ignored(_) => None,
        }
    }
}

enum Moving {
    Existing {
        clip_id: Uuid,
        from_track: TrackKind,
        duration: f64,
        kind: MediaKind,
    },
    New(Clip),
}

impl Moving {
    fn id(&self) -> Uuid {
        match self {
            Moving::Existing { clip_id, .. } => *clip_id,
            Moving::New(clip) => clip.id,
        }
    }

    fn duration(&self) -> f64 {
        match self {
            Moving::Existing { duration, .. } => *duration,
            Moving::New(clip) => clip.duration,
        }
    }

    fn kind(&self) -> MediaKind {
        match self {
            Moving::Existing { kind, .. } => *kind,
            Moving::New(clip) => clip.kind(),
        }
    }
}

fn resolve_source(timeline: &Timeline, source: DropSource) -> Result<Moving, IgnoreReason> {
    match source {
        DropSource::Existing {
            clip_id,
            from_track,
        } => {
            let clip = timeline.track(from_track).get_clip(clip_id).ok_or_else(|| {
                debug!(%clip_id, track = from_track.label(), "drop of unknown clip ignored");
                IgnoreReason::ClipNotFound
            })?;
            Ok(Moving::Existing {
                clip_id,
                from_track,
                duration: clip.duration,
                kind: clip.kind(),
            })
        }
        DropSource::Asset(asset) => Ok(Moving::New(Clip::from_asset(&asset, 0.0))),
        DropSource::Payload(payload) => match MediaAsset::from_payload(&payload) {
            Ok(asset) => Ok(Moving::New(Clip::from_asset(&asset, 0.0))),
            Err(e) => {
                warn!(error = %e, "ignoring malformed drop payload");
                Err(IgnoreReason::MalformedPayload)
            }
        },
    }
}

/// Time a drop resolves to before any track-specific edits. Clips in
/// `exclude` offer no snap edges.
pub fn drop_time(
    timeline: &Timeline,
    request: &DropRequest,
    ctx: &PlacementContext,
    exclude: &[Uuid],
) -> f64 {
    let raw = ((request.pointer_x + ctx.scroll_x - request.drag_offset_x) / ctx.pixels_per_second)
        .max(0.0);
    let precise = !ctx.snapping_enabled || request.no_snap;
    let targets = match ctx.strategy {
        SnapStrategy::Proximity { .. } if !precise => {
            snap::collect_targets(timeline, ctx.ticks.iter().copied(), exclude)
        }
        _ => Vec::new(),
    };
    snap::resolve(raw, ctx.strategy, &targets, ctx.pixels_per_second, precise)
}

/// Resolve and apply a drop.
pub fn place(
    timeline: &mut Timeline,
    request: DropRequest,
    ctx: &PlacementContext,
) -> PlacementOutcome {
    let moving = match resolve_source(timeline, request.source.clone()) {
        Ok(moving) => moving,
        Err(reason) => return PlacementOutcome::Ignored(reason),
    };
    let mut exclude = vec![moving.id()];
    if let Moving::Existing {
        clip_id,
        from_track,
        ..
    } = &moving
    {
        exclude.extend(timeline.linked_followers(*clip_id, *from_track, request.target_track));
    }
    let time = drop_time(timeline, &request, ctx, &exclude);
    let mode = if request.force_insert {
        DropMode::Insert
    } else {
        ctx.drop_mode
    };
    apply(timeline, moving, request.target_track, time, mode)
}

/// Place a new clip at an already-resolved time.
pub fn place_clip_at(
    timeline: &mut Timeline,
    clip: Clip,
    target: TrackKind,
    time: f64,
    mode: DropMode,
) -> PlacementOutcome {
    apply(timeline, Moving::New(clip), target, time.max(0.0), mode)
}

fn apply(
    timeline: &mut Timeline,
    moving: Moving,
    target: TrackKind,
    time: f64,
    mode: DropMode,
) -> PlacementOutcome {
    let moving_id = moving.id();
    if !target.accepts(moving.kind()) {
        debug!(clip_id = %moving_id, track = target.label(), "incompatible drop ignored");
        return PlacementOutcome::Ignored(IgnoreReason::IncompatibleTrack);
    }

    let duration = moving.duration();
    match mode {
        DropMode::Insert => timeline.ripple_shift(target, time, duration, Some(moving_id)),
        DropMode::Overwrite => {
            let removed =
                timeline.remove_overlapping(target, time, time + duration, Some(moving_id));
            if !removed.is_empty() {
                debug!(count = removed.len(), track = target.label(), "overwrite removed clips");
            }
        }
    }

    match moving {
        Moving::Existing {
            clip_id,
            from_track,
            ..
        } => {
            timeline.move_clip(clip_id, from_track, target, time);
        }
        Moving::New(mut clip) => {
            clip.start_time = time;
            timeline.add_clip(target, clip);
        }
    }

    PlacementOutcome::Placed {
        clip_id: moving_id,
        track: target,
        start_time: time,
    }
}
