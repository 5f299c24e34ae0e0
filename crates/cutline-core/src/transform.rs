//! Mapping between timeline seconds and pixels, ruler ticks, and the
//! auto-extending canvas.

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::timeline::{Timeline, TrackKind};

/// Seconds added per auto-extension step.
pub const EXTEND_CHUNK_SECS: f64 = 60.0;
/// Minimum distance, in pixels, the visible window keeps from the content end.
pub const EXTEND_MIN_THRESHOLD_PX: f64 = 256.0;

/// Major tick intervals in seconds, paired with the minimum pixels-per-second
/// at which each one keeps its labels apart.
const TICK_STEPS: [(f64, f64); 6] = [
    (120.0, 1.0),
    (60.0, 2.0),
    (30.0, 5.0),
    (15.0, 10.0),
    (7.0, 20.0),
    (3.0, 30.0),
];
const COARSEST_TICK_SECS: f64 = 60.0;

pub fn pixels_per_second(base: f64, zoom: f64) -> f64 {
    base * zoom.exp2()
}

/// Largest-readable major tick interval for a given scale.
pub fn major_tick_interval(pixels_per_second: f64) -> f64 {
    TICK_STEPS
        .iter()
        .find(|(min_pps, _)| pixels_per_second >= *min_pps)
        .map(|(_, secs)| *secs)
        .unwrap_or(COARSEST_TICK_SECS)
}

/// Ruler label: plain seconds under a minute, `m:ss` beyond.
pub fn tick_label(secs: f64) -> String {
    let whole = secs.round() as u64;
    if whole < 60 {
        format!("{whole}s")
    } else {
        format!("{}:{:02}", whole / 60, whole % 60)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub time: f64,
    /// Content-space x position.
    pub x: f64,
    pub label: String,
}

/// Lazily walks the major ticks inside a pixel window.
#[derive(Debug, Clone)]
pub struct Ticks {
    interval: f64,
    pixels_per_second: f64,
    index: u64,
    end_secs: f64,
}

impl Iterator for Ticks {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        let time = self.index as f64 * self.interval;
        if time > self.end_secs {
            return None;
        }
        self.index += 1;
        Some(Tick {
            time,
            x: time * self.pixels_per_second,
            label: tick_label(time),
        })
    }
}

/// Zoom, scroll and extent of the visible timeline window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub base_pixels_per_second: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    zoom: f64,
    total_seconds: f64,
    scroll_x: f64,
    scroll_y: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub content_height: f64,
}

impl Viewport {
    pub fn new(config: &EditorConfig, viewport_width: f64) -> Self {
        let mut viewport = Self {
            base_pixels_per_second: config.base_pixels_per_second,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            zoom: 0.0,
            total_seconds: config.initial_total_seconds.max(0.0),
            scroll_x: 0.0,
            scroll_y: 0.0,
            viewport_width: viewport_width.max(0.0),
            viewport_height: 0.0,
            content_height: 0.0,
        };
        viewport.set_zoom(config.initial_zoom);
        viewport
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn total_seconds(&self) -> f64 {
        self.total_seconds
    }

    pub fn scroll_x(&self) -> f64 {
        self.scroll_x
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn pixels_per_second(&self) -> f64 {
        pixels_per_second(self.base_pixels_per_second, self.zoom)
    }

    pub fn content_width(&self) -> f64 {
        self.total_seconds * self.pixels_per_second()
    }

    pub fn max_scroll_x(&self) -> f64 {
        (self.content_width() - self.viewport_width).max(0.0)
    }

    pub fn max_scroll_y(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = self.clamp_zoom(zoom);
        self.auto_extend();
        self.scroll_x = self.scroll_x.clamp(0.0, self.max_scroll_x());
    }

    /// Scroll horizontally, clamped to the content. Growing toward the end
    /// extends the canvas so scrolling never hits a wall.
    pub fn set_scroll_x(&mut self, scroll_x: f64) {
        self.scroll_x = scroll_x.max(0.0);
        self.auto_extend();
        self.scroll_x = self.scroll_x.min(self.max_scroll_x());
    }

    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y.clamp(0.0, self.max_scroll_y());
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width.max(0.0);
        self.auto_extend();
        self.scroll_x = self.scroll_x.clamp(0.0, self.max_scroll_x());
    }

    /// Make sure the timeline covers at least `secs`.
    pub fn ensure_covers(&mut self, secs: f64) {
        if secs > self.total_seconds {
            let chunks = ((secs - self.total_seconds) / EXTEND_CHUNK_SECS).ceil();
            self.total_seconds += chunks * EXTEND_CHUNK_SECS;
        }
    }

    /// Grow `total_seconds` in whole chunks when the visible window is within
    /// the trailing threshold of the content end. Returns whether it grew.
    pub fn auto_extend(&mut self) -> bool {
        let pps = self.pixels_per_second();
        if pps <= 0.0 {
            return false;
        }
        let threshold = EXTEND_MIN_THRESHOLD_PX.max(0.2 * self.viewport_width);
        let visible_end = self.scroll_x + self.viewport_width;
        let remaining = self.content_width() - visible_end;
        if remaining >= threshold {
            return false;
        }
        let deficit_secs = (threshold - remaining) / pps;
        let chunks = (deficit_secs / EXTEND_CHUNK_SECS).ceil().max(1.0);
        self.total_seconds += chunks * EXTEND_CHUNK_SECS;
        true
    }

    /// Content-space pixel position of a time.
    pub fn seconds_to_px(&self, secs: f64) -> f64 {
        secs * self.pixels_per_second()
    }

    pub fn px_to_seconds(&self, px: f64) -> f64 {
        px / self.pixels_per_second()
    }

    /// Time under a pointer given in viewport coordinates, floored at zero.
    pub fn pointer_to_seconds(&self, pointer_x: f64) -> f64 {
        self.px_to_seconds(pointer_x + self.scroll_x).max(0.0)
    }

    pub fn major_tick_interval(&self) -> f64 {
        major_tick_interval(self.pixels_per_second())
    }

    /// Major ticks within half a viewport either side of the visible window.
    pub fn ticks(&self) -> Ticks {
        let pps = self.pixels_per_second();
        let interval = self.major_tick_interval();
        let pad = self.viewport_width / 2.0;
        let start_secs = ((self.scroll_x - pad) / pps).max(0.0);
        let end_secs = (self.scroll_x + self.viewport_width + pad) / pps;
        Ticks {
            interval,
            pixels_per_second: pps,
            index: (start_secs / interval).ceil() as u64,
            end_secs,
        }
    }

    /// Apply a batch of view changes; zoom lands before scroll so the scroll
    /// clamp sees the new content width.
    pub fn apply(&mut self, update: &ViewUpdate) {
        if let Some(zoom) = update.zoom {
            self.set_zoom(zoom);
        }
        if let Some(scroll_x) = update.scroll_x {
            self.set_scroll_x(scroll_x);
        }
        if let Some(scroll_y) = update.scroll_y {
            self.set_scroll_y(scroll_y);
        }
    }

    /// Apply a frame's worth of updates in the order they arrived. Auto-extend
    /// depends on that order, so updates are never folded together.
    pub fn apply_all<'a>(&mut self, updates: impl IntoIterator<Item = &'a ViewUpdate>) {
        for update in updates {
            self.apply(update);
        }
    }
}

/// Pending zoom/scroll changes gathered during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewUpdate {
    pub zoom: Option<f64>,
    pub scroll_x: Option<f64>,
    pub scroll_y: Option<f64>,
}

impl ViewUpdate {
    pub fn zoom(zoom: f64) -> Self {
        Self {
            zoom: Some(zoom),
            ..Self::default()
        }
    }

    pub fn scroll_x(scroll_x: f64) -> Self {
        Self {
            scroll_x: Some(scroll_x),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Pixel geometry of one clip for the render layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipLayout {
    pub clip_id: uuid::Uuid,
    pub left: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackLayout {
    pub kind: TrackKind,
    /// Ordered by start time.
    pub clips: Vec<ClipLayout>,
}

pub fn track_layouts(timeline: &Timeline, pixels_per_second: f64) -> Vec<TrackLayout> {
    timeline
        .tracks()
        .iter()
        .map(|track| TrackLayout {
            kind: track.kind,
            clips: track
                .sorted_clips()
                .into_iter()
                .map(|c| ClipLayout {
                    clip_id: c.id,
                    left: c.start_time * pixels_per_second,
                    width: c.duration * pixels_per_second,
                })
                .collect(),
        })
        .collect()
}
