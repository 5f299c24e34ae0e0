//! The editing session: owns every piece of timeline state and is the single
//! place mutations go through.

use tracing::{debug, info};
use uuid::Uuid;

use crate::commands::{EditorCommand, Key, KeyContext, KeyDispatch, Modifiers, command_for_key};
use crate::config::{EditorConfig, PlacementSnap};
use crate::error::{CoreError, Result};
use crate::media::{MediaAsset, MediaKind, SourceLibrary};
use crate::placement::{
    self, DropMode, DropRequest, IgnoreReason, PlacementContext, PlacementOutcome,
};
use crate::playback::PlaybackClock;
use crate::scrollbar::{ScrollbarKey, ZoomScrollbar};
use crate::selection::Selection;
use crate::snap::{self, SnapStrategy};
use crate::timeline::{Clip, Timeline, TrackKind};
use crate::transform::{Tick, TrackLayout, ViewUpdate, Viewport, track_layouts};
use crate::trim::{self, TrimDrag, TrimEdge};

/// Everything the render layer needs to draw the tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRender {
    pub tracks: Vec<TrackLayout>,
    pub ticks: Vec<Tick>,
    pub playhead_x: f64,
    pub content_width: f64,
    pub scroll_x: f64,
}

#[derive(Debug, Clone)]
pub struct Editor {
    config: EditorConfig,
    timeline: Timeline,
    library: SourceLibrary,
    selection: Selection,
    playback: PlaybackClock,
    viewport: Viewport,
    scrollbar: ZoomScrollbar,
    drop_mode: DropMode,
    snapping: bool,
    trim_drag: Option<TrimDrag>,
    pending_view: Vec<ViewUpdate>,
}

impl Editor {
    pub fn new(config: EditorConfig, viewport_width: f64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            timeline: Timeline::new(),
            library: SourceLibrary::new(),
            selection: Selection::new(),
            playback: PlaybackClock::new(config.default_playback_seconds),
            viewport: Viewport::new(&config, viewport_width),
            scrollbar: ZoomScrollbar::new(&config, viewport_width),
            drop_mode: config.default_drop_mode,
            snapping: true,
            trim_drag: None,
            pending_view: Vec::new(),
            config,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn library(&self) -> &SourceLibrary {
        &self.library
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn playback(&self) -> &PlaybackClock {
        &self.playback
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scrollbar(&self) -> &ZoomScrollbar {
        &self.scrollbar
    }

    pub fn drop_mode(&self) -> DropMode {
        self.drop_mode
    }

    pub fn set_drop_mode(&mut self, mode: DropMode) {
        self.drop_mode = mode;
    }

    pub fn snapping_enabled(&self) -> bool {
        self.snapping
    }

    pub fn set_snapping(&mut self, enabled: bool) {
        self.snapping = enabled;
    }

    pub fn playhead(&self) -> f64 {
        self.playback.current_time()
    }

    // ---- media ----

    pub fn import_asset(&mut self, asset: MediaAsset) -> Uuid {
        let id = asset.id;
        info!(asset_id = %id, name = %asset.name, "imported asset");
        self.library.import(asset);
        id
    }

    /// Remove an asset and every clip cut from it.
    pub fn remove_asset(&mut self, asset_id: Uuid) -> Result<MediaAsset> {
        let asset = self.library.remove(asset_id)?;
        let ids: Vec<Uuid> = self
            .timeline
            .clips_using_media(asset_id)
            .into_iter()
            .map(|(_, id)| id)
            .collect();
        self.timeline.lift_delete(&ids);
        self.selection.prune(&self.timeline);
        self.sync_extent();
        Ok(asset)
    }

    /// Put a clip on a track directly, with no placement rules applied.
    pub fn add_clip(&mut self, track: TrackKind, clip: Clip) -> Uuid {
        let id = clip.id;
        self.timeline.add_clip(track, clip);
        self.sync_extent();
        id
    }

    // ---- selection ----

    pub fn click_clip(&mut self, clip_id: Uuid, shift: bool) {
        if self.timeline.find_clip(clip_id).is_none() {
            debug!(%clip_id, "click on unknown clip ignored");
            return;
        }
        self.selection.click(clip_id, shift);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ---- placement ----

    fn snap_strategy(&self) -> SnapStrategy {
        match self.config.placement_snap {
            PlacementSnap::Proximity => SnapStrategy::Proximity {
                threshold_px: self.config.snap_threshold_px,
            },
            PlacementSnap::Grid => SnapStrategy::Grid,
        }
    }

    fn tick_times(&self) -> Vec<f64> {
        self.viewport.ticks().map(|t| t.time).collect()
    }

    pub fn placement_context(&self) -> PlacementContext {
        PlacementContext {
            scroll_x: self.viewport.scroll_x(),
            pixels_per_second: self.viewport.pixels_per_second(),
            drop_mode: self.drop_mode,
            snapping_enabled: self.snapping,
            strategy: self.snap_strategy(),
            ticks: self.tick_times(),
        }
    }

    pub fn drop_clip(&mut self, request: DropRequest) -> PlacementOutcome {
        let ctx = self.placement_context();
        let outcome = placement::place(&mut self.timeline, request, &ctx);
        if outcome.is_placed() {
            self.selection.prune(&self.timeline);
            self.sync_extent();
        }
        outcome
    }

    /// Insert the `[in_point, out_point)` range of a library asset at the
    /// playhead: video on V1, audio on A1, honouring the current drop mode.
    pub fn insert_from_source(
        &mut self,
        asset_id: Uuid,
        in_point: f64,
        out_point: f64,
    ) -> Result<PlacementOutcome> {
        let asset = self
            .library
            .get(asset_id)
            .ok_or(CoreError::AssetNotFound(asset_id))?;
        let target = match asset.kind() {
            MediaKind::Video => TrackKind::VideoA,
            MediaKind::Audio => TrackKind::AudioA,
            MediaKind::Other => {
                debug!(%asset_id, media_type = %asset.media_type, "source insert of unplaceable media");
                return Ok(PlacementOutcome::Ignored(IgnoreReason::IncompatibleTrack));
            }
        };
        let playhead = self.playhead();
        let clip = Clip::from_asset_range(asset, playhead, in_point, out_point);
        let outcome =
            placement::place_clip_at(&mut self.timeline, clip, target, playhead, self.drop_mode);
        if outcome.is_placed() {
            self.selection.prune(&self.timeline);
            self.sync_extent();
        }
        Ok(outcome)
    }

    // ---- trimming ----

    /// Start dragging a clip edge. Returns whether the clip was found.
    pub fn begin_trim(&mut self, track: TrackKind, clip_id: Uuid, edge: TrimEdge) -> bool {
        match TrimDrag::begin(&self.timeline, track, clip_id, edge) {
            Ok(drag) => {
                self.trim_drag = Some(drag);
                true
            }
            Err(e) => {
                debug!(error = %e, "trim drag not started");
                false
            }
        }
    }

    /// Pointer moved `pointer_dx_px` since the trim began.
    pub fn update_trim(&mut self, pointer_dx_px: f64) -> bool {
        let Some(drag) = &self.trim_drag else {
            return false;
        };
        let patch = drag.update(pointer_dx_px, self.viewport.pixels_per_second());
        let applied = self.timeline.update_clip(drag.track, drag.clip_id(), &patch);
        if applied {
            self.sync_extent();
        }
        applied
    }

    pub fn end_trim(&mut self) {
        self.trim_drag = None;
    }

    pub fn trim_drag(&self) -> Option<&TrimDrag> {
        self.trim_drag.as_ref()
    }

    // ---- playhead ----

    pub fn seek(&mut self, time: f64) {
        self.playback.seek(time);
        self.viewport.ensure_covers(self.playback.current_time());
    }

    /// Move the playhead to the pointer, snapping to nearby clip edges and
    /// ticks unless `precise` or snapping is off.
    pub fn scrub_to(&mut self, pointer_x: f64, precise: bool) -> f64 {
        let raw = self.viewport.pointer_to_seconds(pointer_x);
        let precise = precise || !self.snapping;
        let targets = if precise {
            Vec::new()
        } else {
            snap::collect_targets(&self.timeline, self.tick_times(), &[])
        };
        let time = snap::resolve(
            raw,
            SnapStrategy::Proximity {
                threshold_px: self.config.snap_threshold_px,
            },
            &targets,
            self.viewport.pixels_per_second(),
            precise,
        );
        self.seek(time);
        time
    }

    pub fn tick(&mut self, dt: f64) {
        self.playback.tick(dt);
    }

    /// The clip the viewer should show at the playhead.
    pub fn active_clip(&self) -> Option<(TrackKind, &Clip)> {
        self.timeline.active_clip_at(self.playhead())
    }

    // ---- view ----

    /// Queue a view change until the next [`Editor::flush_view`].
    pub fn queue_view_update(&mut self, update: ViewUpdate) {
        if !update.is_empty() {
            self.pending_view.push(update);
        }
    }

    /// Apply everything queued this frame, in order.
    pub fn flush_view(&mut self) {
        let pending = std::mem::take(&mut self.pending_view);
        self.viewport.apply_all(&pending);
    }

    pub fn has_pending_view(&self) -> bool {
        !self.pending_view.is_empty()
    }

    pub fn resize(&mut self, viewport_width: f64, track_width: f64) {
        self.viewport.set_viewport_width(viewport_width);
        self.scrollbar.track_width = track_width.max(0.0);
    }

    pub fn scrollbar_pointer_down(&mut self, x: f64) {
        let update = self.scrollbar.pointer_down(&self.viewport, x);
        self.queue_view_update(update);
    }

    pub fn scrollbar_pointer_move(&mut self, x: f64) {
        let update = self.scrollbar.pointer_move(&self.viewport, x);
        self.queue_view_update(update);
    }

    pub fn scrollbar_pointer_up(&mut self) {
        self.scrollbar.pointer_up();
    }

    pub fn scrollbar_wheel(&mut self, delta: f64, zoom_modifier: bool, pointer_x: f64) {
        let update = self
            .scrollbar
            .wheel(&self.viewport, delta, zoom_modifier, pointer_x);
        self.queue_view_update(update);
    }

    /// Key steps are relative to the current view, so earlier queued
    /// changes land first.
    pub fn scrollbar_key(&mut self, key: ScrollbarKey) {
        self.flush_view();
        let update = self.scrollbar.key(&self.viewport, key);
        self.queue_view_update(update);
    }

    pub fn render_tracks(&self) -> TimelineRender {
        TimelineRender {
            tracks: track_layouts(&self.timeline, self.viewport.pixels_per_second()),
            ticks: self.viewport.ticks().collect(),
            playhead_x: self.viewport.seconds_to_px(self.playhead()),
            content_width: self.viewport.content_width(),
            scroll_x: self.viewport.scroll_x(),
        }
    }

    // ---- keyboard ----

    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers, context: &KeyContext) -> KeyDispatch {
        let dispatch = command_for_key(key, modifiers, context, self.config.shift_nudge_frames);
        if let KeyDispatch::Command(command) = dispatch {
            self.execute(command);
        }
        dispatch
    }

    pub fn execute(&mut self, command: EditorCommand) {
        debug!(?command, "executing command");
        match command {
            EditorCommand::TogglePlayback => {
                self.playback.toggle();
            }
            EditorCommand::NudgeFrames(frames) => {
                let time = self.playhead() + f64::from(frames) * self.config.frame_secs();
                self.seek(time);
            }
            EditorCommand::JumpToPreviousEdge => {
                if let Some(edge) = self.timeline.previous_edge(self.playhead()) {
                    self.seek(edge);
                }
            }
            EditorCommand::JumpToNextEdge => {
                if let Some(edge) = self.timeline.next_edge(self.playhead()) {
                    self.seek(edge);
                }
            }
            EditorCommand::SetInsertMode => self.drop_mode = DropMode::Insert,
            EditorCommand::SetOverwriteMode => self.drop_mode = DropMode::Overwrite,
            EditorCommand::TrimStartToPlayhead => {
                let patches =
                    trim::trim_start_to_playhead(&self.timeline, self.selection.iter(), self.playhead());
                self.timeline.update_clips(patches);
                self.sync_extent();
            }
            EditorCommand::TrimEndToPlayhead => {
                let patches =
                    trim::trim_end_to_playhead(&self.timeline, self.selection.iter(), self.playhead());
                self.timeline.update_clips(patches);
                self.sync_extent();
            }
            EditorCommand::LiftDelete => {
                self.timeline.lift_delete(&self.selection.ids());
                self.selection.clear();
                self.sync_extent();
            }
            EditorCommand::RippleDelete => {
                self.timeline.ripple_delete(&self.selection.ids());
                self.selection.clear();
                self.sync_extent();
            }
            EditorCommand::ToggleLink => {
                for media_id in self.selection.media_ids(&self.timeline) {
                    let linked = self.timeline.links.toggle(media_id);
                    debug!(%media_id, linked, "toggled link");
                }
            }
            EditorCommand::ToggleSnapping => self.snapping = !self.snapping,
            EditorCommand::ZoomIn => self.scrollbar_key(ScrollbarKey::ZoomIn),
            EditorCommand::ZoomOut => self.scrollbar_key(ScrollbarKey::ZoomOut),
        }
    }

    /// Keep the canvas and transport long enough for the edited timeline.
    fn sync_extent(&mut self) {
        let end = self.timeline.end_time();
        self.viewport.ensure_covers(end);
        self.playback
            .set_duration(self.config.default_playback_seconds.max(end));
    }
}
