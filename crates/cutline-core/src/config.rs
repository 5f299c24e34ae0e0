use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CoreError, Result};
use crate::placement::DropMode;

/// Which snapping policy drag-and-drop placement uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlacementSnap {
    /// Snap to nearby clip edges and ruler ticks within a pixel threshold.
    #[default]
    Proximity,
    /// Round to a zoom-dependent grid.
    Grid,
}

/// Tunables for the timeline editor. Every field falls back to its default
/// when absent from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub base_pixels_per_second: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub initial_zoom: f64,
    pub initial_total_seconds: f64,
    pub snap_threshold_px: f64,
    pub fps: u32,
    /// Frames moved by a shifted arrow-key nudge.
    pub shift_nudge_frames: u32,
    pub default_drop_mode: DropMode,
    pub placement_snap: PlacementSnap,
    pub scrollbar_min_handle_px: f64,
    pub zoom_step: f64,
    pub wheel_zoom_sensitivity: f64,
    pub default_playback_seconds: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            base_pixels_per_second: 20.0,
            min_zoom: 0.0,
            max_zoom: 6.0,
            initial_zoom: 0.0,
            initial_total_seconds: 60.0,
            snap_threshold_px: 8.0,
            fps: 30,
            shift_nudge_frames: 10,
            default_drop_mode: DropMode::Overwrite,
            placement_snap: PlacementSnap::Proximity,
            scrollbar_min_handle_px: 32.0,
            zoom_step: 0.1,
            wheel_zoom_sensitivity: 0.0025,
            default_playback_seconds: 30.0,
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        info!(path = %path.display(), "loaded editor config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_pixels_per_second.is_nan() || self.base_pixels_per_second <= 0.0 {
            return Err(CoreError::InvalidConfig(format!(
                "base_pixels_per_second must be positive, got {}",
                self.base_pixels_per_second
            )));
        }
        if self.min_zoom > self.max_zoom {
            return Err(CoreError::InvalidConfig(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.fps == 0 {
            return Err(CoreError::InvalidConfig("fps must be non-zero".into()));
        }
        if i32::try_from(self.shift_nudge_frames).is_err() {
            return Err(CoreError::InvalidConfig(format!(
                "shift_nudge_frames {} is out of range",
                self.shift_nudge_frames
            )));
        }
        if self.snap_threshold_px < 0.0 {
            return Err(CoreError::InvalidConfig(
                "snap_threshold_px must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Length of one frame in seconds.
    pub fn frame_secs(&self) -> f64 {
        1.0 / self.fps as f64
    }
}
