use std::path::PathBuf;

use cutline_core::media::MediaAsset;
use cutline_core::timeline::{Clip, Timeline, TrackKind};
use uuid::Uuid;

/// Builder for creating test MediaAssets with sensible defaults.
pub struct MediaAssetBuilder {
    name: String,
    media_type: String,
    duration_secs: f64,
    resolution: String,
    file: Option<PathBuf>,
}

impl MediaAssetBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            media_type: "video/mp4".into(),
            duration_secs: 10.0,
            resolution: "1920x1080".into(),
            file: None,
        }
    }

    pub fn duration_secs(mut self, secs: f64) -> Self {
        self.duration_secs = secs;
        self
    }

    pub fn media_type(mut self, media_type: &str) -> Self {
        self.media_type = media_type.into();
        self
    }

    pub fn audio(self) -> Self {
        self.media_type("audio/mpeg")
    }

    pub fn resolution(mut self, resolution: &str) -> Self {
        self.resolution = resolution.into();
        self
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn build(self) -> MediaAsset {
        let mut asset = MediaAsset::new(self.name, self.media_type, self.duration_secs);
        asset.resolution = self.resolution;
        asset.file = self.file;
        asset
    }
}

/// Builder for creating test Clips with sensible defaults.
pub struct ClipBuilder {
    media_id: Uuid,
    media_type: String,
    start_secs: f64,
    in_point_secs: f64,
    duration_secs: f64,
}

impl ClipBuilder {
    pub fn new(media_id: Uuid) -> Self {
        Self {
            media_id,
            media_type: "video/mp4".into(),
            start_secs: 0.0,
            in_point_secs: 0.0,
            duration_secs: 5.0,
        }
    }

    pub fn at(mut self, start_secs: f64) -> Self {
        self.start_secs = start_secs;
        self
    }

    pub fn in_point(mut self, secs: f64) -> Self {
        self.in_point_secs = secs;
        self
    }

    pub fn duration_secs(mut self, secs: f64) -> Self {
        self.duration_secs = secs;
        self
    }

    pub fn audio(mut self) -> Self {
        self.media_type = "audio/mpeg".into();
        self
    }

    pub fn build(self) -> Clip {
        Clip {
            id: Uuid::new_v4(),
            media_id: self.media_id,
            name: format!("clip@{}", self.start_secs),
            media_type: self.media_type,
            start_time: self.start_secs,
            duration: self.duration_secs,
            in_point: self.in_point_secs,
            out_point: self.in_point_secs + self.duration_secs,
            thumbnail: None,
            file: None,
        }
    }
}

/// Build a timeline with clips already in place.
#[derive(Default)]
pub struct TimelineBuilder {
    clips: Vec<(TrackKind, Clip)>,
    unlinked: Vec<Uuid>,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clip(mut self, track: TrackKind, clip: Clip) -> Self {
        self.clips.push((track, clip));
        self
    }

    pub fn unlinked(mut self, media_id: Uuid) -> Self {
        self.unlinked.push(media_id);
        self
    }

    pub fn build(self) -> Timeline {
        let mut timeline = Timeline::new();
        for (track, clip) in self.clips {
            timeline.add_clip(track, clip);
        }
        for media_id in self.unlinked {
            timeline.links.set_linked(media_id, false);
        }
        timeline
    }
}
