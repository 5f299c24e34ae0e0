use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, Result};

/// Broad media category derived from an asset's MIME-like type string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Video,
    Audio,
    Other,
}

impl MediaKind {
    /// Classify a type string such as `video/mp4` or `audio/wav`.
    pub fn from_type(media_type: &str) -> Self {
        let lower = media_type.trim().to_ascii_lowercase();
        if lower.starts_with("video") {
            MediaKind::Video
        } else if lower.starts_with("audio") {
            MediaKind::Audio
        } else {
            MediaKind::Other
        }
    }
}

/// A source media item as handed over by the import pipeline.
///
/// Missing durations deserialize as zero; the core never probes media itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaAsset {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type", alias = "media_type")]
    pub media_type: String,
    #[serde(default, alias = "durationSeconds")]
    pub duration_secs: f64,
    #[serde(default)]
    pub resolution: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl MediaAsset {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, duration_secs: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            media_type: media_type.into(),
            duration_secs: sanitize_duration(duration_secs),
            resolution: String::new(),
            thumbnail: None,
            file: None,
        }
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::from_type(&self.media_type)
    }

    /// Decode a drag-and-drop payload into an asset.
    pub fn from_payload(payload: &str) -> Result<Self> {
        let mut asset: MediaAsset = serde_json::from_str(payload)?;
        asset.duration_secs = sanitize_duration(asset.duration_secs);
        Ok(asset)
    }

    pub fn to_payload(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn sanitize_duration(secs: f64) -> f64 {
    if secs.is_finite() && secs > 0.0 { secs } else { 0.0 }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SourceLibrary {
    assets: Vec<MediaAsset>,
}

impl SourceLibrary {
    pub fn new() -> Self {
        Self { assets: Vec::new() }
    }

    pub fn import(&mut self, asset: MediaAsset) {
        self.assets.push(asset);
    }

    pub fn remove(&mut self, id: Uuid) -> Result<MediaAsset> {
        let idx = self
            .assets
            .iter()
            .position(|a| a.id == id)
            .ok_or(CoreError::AssetNotFound(id))?;
        Ok(self.assets.remove(idx))
    }

    pub fn get(&self, id: Uuid) -> Option<&MediaAsset> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn assets(&self) -> &[MediaAsset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
