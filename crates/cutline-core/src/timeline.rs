use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::links::LinkGroups;
use crate::media::{MediaAsset, MediaKind};

/// Shortest duration any clip may be trimmed to, in seconds.
pub const MIN_CLIP_DURATION: f64 = 0.1;

/// Tolerance used when comparing clip edges against each other.
pub const TIME_EPSILON: f64 = 1e-9;

/// One of the four fixed lanes of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrackKind {
    VideoA,
    VideoB,
    AudioA,
    AudioB,
}

impl TrackKind {
    pub const ALL: [TrackKind; 4] = [
        TrackKind::VideoA,
        TrackKind::VideoB,
        TrackKind::AudioA,
        TrackKind::AudioB,
    ];
    pub const VIDEO: [TrackKind; 2] = [TrackKind::VideoA, TrackKind::VideoB];
    pub const AUDIO: [TrackKind; 2] = [TrackKind::AudioA, TrackKind::AudioB];

    pub fn index(self) -> usize {
        match self {
            TrackKind::VideoA => 0,
            TrackKind::VideoB => 1,
            TrackKind::AudioA => 2,
            TrackKind::AudioB => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TrackKind::VideoA => "V1",
            TrackKind::VideoB => "V2",
            TrackKind::AudioA => "A1",
            TrackKind::AudioB => "A2",
        }
    }

    pub fn is_video(self) -> bool {
        matches!(self, TrackKind::VideoA | TrackKind::VideoB)
    }

    pub fn is_audio(self) -> bool {
        !self.is_video()
    }

    /// The pair on the other side of the picture/sound divide.
    pub fn counterparts(self) -> [TrackKind; 2] {
        if self.is_video() {
            TrackKind::AUDIO
        } else {
            TrackKind::VIDEO
        }
    }

    /// Whether media of the given kind may be placed on this track.
    pub fn accepts(self, kind: MediaKind) -> bool {
        match kind {
            MediaKind::Video => self.is_video(),
            MediaKind::Audio => self.is_audio(),
            MediaKind::Other => false,
        }
    }
}

/// A placed instance of a media asset on a track.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Clip {
    pub id: Uuid,
    /// The media asset this clip was cut from.
    pub media_id: Uuid,
    pub name: String,
    pub media_type: String,
    /// Position on the track, in seconds.
    pub start_time: f64,
    pub duration: f64,
    /// Source in/out points, in seconds into the asset.
    pub in_point: f64,
    pub out_point: f64,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Clip {
    /// Create a clip covering the whole asset, starting at `start_time`.
    pub fn from_asset(asset: &MediaAsset, start_time: f64) -> Self {
        Self::from_asset_range(asset, start_time, 0.0, asset.duration_secs)
    }

    /// Create a clip from the `[in_point, out_point)` range of an asset.
    pub fn from_asset_range(
        asset: &MediaAsset,
        start_time: f64,
        in_point: f64,
        out_point: f64,
    ) -> Self {
        let in_point = in_point.max(0.0);
        let duration = (out_point - in_point).max(MIN_CLIP_DURATION);
        Self {
            id: Uuid::new_v4(),
            media_id: asset.id,
            name: asset.name.clone(),
            media_type: asset.media_type.clone(),
            start_time: start_time.max(0.0),
            duration,
            in_point,
            out_point: in_point + duration,
            thumbnail: asset.thumbnail.clone(),
            file: asset.file.clone(),
        }
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::from_type(&self.media_type)
    }

    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Half-open containment: the end edge belongs to whatever follows.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start_time && time < self.end_time()
    }

    /// Half-open overlap against `[start, end)`.
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        self.start_time < end && start < self.end_time()
    }
}

/// Partial field changes merged into a clip by [`Timeline::update_clip`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipPatch {
    pub start_time: Option<f64>,
    pub duration: Option<f64>,
    pub in_point: Option<f64>,
    pub out_point: Option<f64>,
    pub name: Option<String>,
}

impl ClipPatch {
    pub fn start_time(mut self, secs: f64) -> Self {
        self.start_time = Some(secs);
        self
    }

    pub fn duration(mut self, secs: f64) -> Self {
        self.duration = Some(secs);
        self
    }

    pub fn in_point(mut self, secs: f64) -> Self {
        self.in_point = Some(secs);
        self
    }

    pub fn out_point(mut self, secs: f64) -> Self {
        self.out_point = Some(secs);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == ClipPatch::default()
    }

    pub fn apply(&self, clip: &mut Clip) {
        if let Some(start) = self.start_time {
            clip.start_time = start;
        }
        if let Some(duration) = self.duration {
            clip.duration = duration;
        }
        if let Some(in_point) = self.in_point {
            clip.in_point = in_point;
        }
        if let Some(out_point) = self.out_point {
            clip.out_point = out_point;
        }
        if let Some(name) = &self.name {
            clip.name = name.clone();
        }
    }
}

/// A lane holding clips in insertion order. Start times define logical order.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub kind: TrackKind,
    clips: Vec<Clip>,
}

impl Track {
    fn new(kind: TrackKind) -> Self {
        Self {
            kind,
            clips: Vec::new(),
        }
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn get_clip(&self, clip_id: Uuid) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == clip_id)
    }

    fn get_clip_mut(&mut self, clip_id: Uuid) -> Option<&mut Clip> {
        self.clips.iter_mut().find(|c| c.id == clip_id)
    }

    fn take_clip(&mut self, clip_id: Uuid) -> Option<Clip> {
        let idx = self.clips.iter().position(|c| c.id == clip_id)?;
        Some(self.clips.remove(idx))
    }

    /// Find the clip covering the given time.
    pub fn clip_at(&self, time: f64) -> Option<&Clip> {
        self.clips.iter().find(|c| c.contains(time))
    }

    /// Clips ordered by start time.
    pub fn sorted_clips(&self) -> Vec<&Clip> {
        let mut sorted: Vec<&Clip> = self.clips.iter().collect();
        sorted.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        sorted
    }

    pub fn end_time(&self) -> f64 {
        self.clips.iter().map(Clip::end_time).fold(0.0, f64::max)
    }
}

/// Tracks whose linked clips follow a move: the counterpart pair within a
/// track, otherwise the audio pair whenever video is involved.
fn follower_tracks(from: TrackKind, to: TrackKind) -> [TrackKind; 2] {
    if from == to {
        from.counterparts()
    } else if from.is_video() || to.is_video() {
        TrackKind::AUDIO
    } else {
        TrackKind::VIDEO
    }
}

/// The authoritative clip/track store.
///
/// Mutations never fail: operations that reference an unknown clip leave the
/// model untouched and report `false` so callers (and tests) can observe the
/// no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    tracks: Vec<Track>,
    pub links: LinkGroups,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            tracks: TrackKind::ALL.iter().map(|k| Track::new(*k)).collect(),
            links: LinkGroups::new(),
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, kind: TrackKind) -> &Track {
        &self.tracks[kind.index()]
    }

    fn track_mut(&mut self, kind: TrackKind) -> &mut Track {
        &mut self.tracks[kind.index()]
    }

    /// Append a clip. Overlap legality is the caller's business.
    pub fn add_clip(&mut self, kind: TrackKind, clip: Clip) {
        self.track_mut(kind).clips.push(clip);
    }

    pub fn remove_clip(&mut self, kind: TrackKind, clip_id: Uuid) -> Option<Clip> {
        let removed = self.track_mut(kind).take_clip(clip_id);
        if removed.is_none() {
            debug!(%clip_id, track = kind.label(), "remove_clip: no such clip");
        }
        removed
    }

    pub fn update_clip(&mut self, kind: TrackKind, clip_id: Uuid, patch: &ClipPatch) -> bool {
        match self.track_mut(kind).get_clip_mut(clip_id) {
            Some(clip) => {
                patch.apply(clip);
                true
            }
            None => {
                debug!(%clip_id, track = kind.label(), "update_clip: no such clip");
                false
            }
        }
    }

    /// Apply several patches in order. Returns how many found their clip.
    pub fn update_clips<I>(&mut self, batch: I) -> usize
    where
        I: IntoIterator<Item = (TrackKind, Uuid, ClipPatch)>,
    {
        batch
            .into_iter()
            .filter(|(kind, clip_id, patch)| self.update_clip(*kind, *clip_id, patch))
            .count()
    }

    /// Set a clip's start time, dragging linked counterparts along.
    pub fn reposition_clip(&mut self, kind: TrackKind, clip_id: Uuid, new_start: f64) -> bool {
        let new_start = new_start.max(0.0);
        let Some(clip) = self.track_mut(kind).get_clip_mut(clip_id) else {
            debug!(%clip_id, track = kind.label(), "reposition_clip: no such clip");
            return false;
        };
        let delta = new_start - clip.start_time;
        clip.start_time = new_start;
        let media_id = clip.media_id;

        if delta != 0.0 && self.links.is_linked(media_id) {
            self.shift_media(follower_tracks(kind, kind), media_id, delta, clip_id);
        }
        true
    }

    /// Move a clip to another track at a new start time.
    ///
    /// Linked counterparts follow on the pair not being moved across: the
    /// audio pair when either end of the move is a video track.
    pub fn move_clip(
        &mut self,
        clip_id: Uuid,
        from: TrackKind,
        to: TrackKind,
        new_start: f64,
    ) -> bool {
        if from == to {
            return self.reposition_clip(from, clip_id, new_start);
        }
        let Some(mut clip) = self.track_mut(from).take_clip(clip_id) else {
            debug!(%clip_id, track = from.label(), "move_clip: no such clip");
            return false;
        };
        let new_start = new_start.max(0.0);
        let delta = new_start - clip.start_time;
        clip.start_time = new_start;
        let media_id = clip.media_id;
        self.track_mut(to).clips.push(clip);

        if delta != 0.0 && self.links.is_linked(media_id) {
            self.shift_media(follower_tracks(from, to), media_id, delta, clip_id);
        }
        true
    }

    /// Linked clips that would travel with `clip_id` on a move from `from`
    /// to `to`.
    pub fn linked_followers(&self, clip_id: Uuid, from: TrackKind, to: TrackKind) -> Vec<Uuid> {
        let Some(media_id) = self.track(from).get_clip(clip_id).map(|c| c.media_id) else {
            return Vec::new();
        };
        if !self.links.is_linked(media_id) {
            return Vec::new();
        }
        follower_tracks(from, to)
            .into_iter()
            .flat_map(|kind| self.track(kind).clips.iter())
            .filter(|c| c.media_id == media_id && c.id != clip_id)
            .map(|c| c.id)
            .collect()
    }

    fn shift_media(&mut self, kinds: [TrackKind; 2], media_id: Uuid, delta: f64, exclude: Uuid) {
        for kind in kinds {
            for clip in self
                .track_mut(kind)
                .clips
                .iter_mut()
                .filter(|c| c.media_id == media_id && c.id != exclude)
            {
                clip.start_time = (clip.start_time + delta).max(0.0);
            }
        }
    }

    /// Push every clip starting at or after `from_time` later by `delta`.
    ///
    /// Clips are visited in ascending start order so the shift never
    /// depends on insertion order.
    pub fn ripple_shift(&mut self, kind: TrackKind, from_time: f64, delta: f64, exclude: Option<Uuid>) {
        let track = self.track_mut(kind);
        let mut later: Vec<&mut Clip> = track
            .clips
            .iter_mut()
            .filter(|c| Some(c.id) != exclude && c.start_time >= from_time - TIME_EPSILON)
            .collect();
        later.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        for clip in later {
            clip.start_time = (clip.start_time + delta).max(0.0);
        }
    }

    /// Remove every clip overlapping `[start, end)` except `exclude`.
    pub fn remove_overlapping(
        &mut self,
        kind: TrackKind,
        start: f64,
        end: f64,
        exclude: Option<Uuid>,
    ) -> Vec<Clip> {
        let track = self.track_mut(kind);
        let (removed, kept): (Vec<Clip>, Vec<Clip>) = track
            .clips
            .drain(..)
            .partition(|c| Some(c.id) != exclude && c.overlaps(start, end));
        track.clips = kept;
        removed
    }

    /// Remove clips without closing the gaps they leave.
    pub fn lift_delete(&mut self, clip_ids: &[Uuid]) -> usize {
        let ids: HashSet<Uuid> = clip_ids.iter().copied().collect();
        let mut count = 0;
        for track in &mut self.tracks {
            let before = track.clips.len();
            track.clips.retain(|c| !ids.contains(&c.id));
            count += before - track.clips.len();
        }
        count
    }

    /// Remove clips and, per track, pull every later clip earlier by each
    /// removed clip's duration.
    pub fn ripple_delete(&mut self, clip_ids: &[Uuid]) -> usize {
        let ids: HashSet<Uuid> = clip_ids.iter().copied().collect();
        let mut count = 0;
        for track in &mut self.tracks {
            let (mut removed, kept): (Vec<Clip>, Vec<Clip>) =
                track.clips.drain(..).partition(|c| ids.contains(&c.id));
            track.clips = kept;
            count += removed.len();

            // Latest gap first, so earlier gaps see already-closed positions.
            removed.sort_by(|a, b| b.start_time.total_cmp(&a.start_time));
            for gone in removed {
                for clip in track
                    .clips
                    .iter_mut()
                    .filter(|c| c.start_time >= gone.start_time - TIME_EPSILON)
                {
                    clip.start_time = (clip.start_time - gone.duration).max(0.0);
                }
            }
        }
        count
    }

    /// Locate a clip on any track.
    pub fn find_clip(&self, clip_id: Uuid) -> Option<(TrackKind, &Clip)> {
        self.tracks
            .iter()
            .find_map(|t| t.get_clip(clip_id).map(|c| (t.kind, c)))
    }

    pub fn clips(&self) -> impl Iterator<Item = (TrackKind, &Clip)> {
        self.tracks
            .iter()
            .flat_map(|t| t.clips.iter().map(move |c| (t.kind, c)))
    }

    /// Start and end edges of every clip across all tracks, sorted and
    /// deduplicated. `exclude` skips the clips being dragged.
    pub fn clip_edges(&self, exclude: &[Uuid]) -> Vec<f64> {
        let mut edges: Vec<f64> = self
            .clips()
            .filter(|(_, c)| !exclude.contains(&c.id))
            .flat_map(|(_, c)| [c.start_time, c.end_time()])
            .collect();
        edges.sort_by(f64::total_cmp);
        edges.dedup_by(|a, b| (*a - *b).abs() < TIME_EPSILON);
        edges
    }

    /// Nearest clip edge strictly before `time`.
    pub fn previous_edge(&self, time: f64) -> Option<f64> {
        self.clip_edges(&[])
            .into_iter()
            .rev()
            .find(|e| *e < time - TIME_EPSILON)
    }

    /// Nearest clip edge strictly after `time`.
    pub fn next_edge(&self, time: f64) -> Option<f64> {
        self.clip_edges(&[])
            .into_iter()
            .find(|e| *e > time + TIME_EPSILON)
    }

    /// The clip the playback collaborator should show at `time`: the first
    /// clip on a video track whose span contains it.
    pub fn active_clip_at(&self, time: f64) -> Option<(TrackKind, &Clip)> {
        TrackKind::VIDEO
            .iter()
            .find_map(|k| self.track(*k).clip_at(time).map(|c| (*k, c)))
    }

    pub fn clips_using_media(&self, media_id: Uuid) -> Vec<(TrackKind, Uuid)> {
        self.clips()
            .filter(|(_, c)| c.media_id == media_id)
            .map(|(k, c)| (k, c.id))
            .collect()
    }

    /// End of the last clip across all tracks.
    pub fn end_time(&self) -> f64 {
        self.tracks.iter().map(Track::end_time).fold(0.0, f64::max)
    }

    pub fn clip_count(&self) -> usize {
        self.tracks.iter().map(Track::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(media_id: Uuid, start: f64, duration: f64) -> Clip {
        Clip {
            id: Uuid::new_v4(),
            media_id,
            name: "c".into(),
            media_type: "video/mp4".into(),
            start_time: start,
            duration,
            in_point: 0.0,
            out_point: duration,
            thumbnail: None,
            file: None,
        }
    }

    #[test]
    fn test_counterparts_partition() {
        assert_eq!(TrackKind::VideoB.counterparts(), TrackKind::AUDIO);
        assert_eq!(TrackKind::AudioA.counterparts(), TrackKind::VIDEO);
    }

    #[test]
    fn test_accepts_by_media_kind() {
        assert!(TrackKind::VideoA.accepts(MediaKind::Video));
        assert!(!TrackKind::VideoA.accepts(MediaKind::Audio));
        assert!(TrackKind::AudioB.accepts(MediaKind::Audio));
        assert!(!TrackKind::AudioB.accepts(MediaKind::Other));
    }

    #[test]
    fn test_ripple_shift_skips_excluded_and_earlier() {
        let mut tl = Timeline::new();
        let m = Uuid::new_v4();
        let early = clip(m, 0.0, 2.0);
        let late = clip(m, 5.0, 2.0);
        let moving = clip(m, 6.0, 1.0);
        let (early_id, late_id, moving_id) = (early.id, late.id, moving.id);
        tl.add_clip(TrackKind::VideoA, early);
        tl.add_clip(TrackKind::VideoA, late);
        tl.add_clip(TrackKind::VideoA, moving);

        tl.ripple_shift(TrackKind::VideoA, 3.0, 4.0, Some(moving_id));

        let track = tl.track(TrackKind::VideoA);
        assert_eq!(track.get_clip(early_id).unwrap().start_time, 0.0);
        assert_eq!(track.get_clip(late_id).unwrap().start_time, 9.0);
        assert_eq!(track.get_clip(moving_id).unwrap().start_time, 6.0);
    }

    #[test]
    fn test_clip_edges_dedup() {
        let mut tl = Timeline::new();
        let m = Uuid::new_v4();
        tl.add_clip(TrackKind::VideoA, clip(m, 0.0, 2.0));
        tl.add_clip(TrackKind::AudioA, clip(m, 2.0, 3.0));
        assert_eq!(tl.clip_edges(&[]), vec![0.0, 2.0, 5.0]);
    }

    #[test]
    fn test_patch_apply_only_set_fields() {
        let mut c = clip(Uuid::new_v4(), 1.0, 4.0);
        ClipPatch::default().duration(2.0).apply(&mut c);
        assert_eq!(c.start_time, 1.0);
        assert_eq!(c.duration, 2.0);
        assert!(ClipPatch::default().is_empty());
    }
}
