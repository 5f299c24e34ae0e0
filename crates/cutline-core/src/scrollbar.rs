//! Combined zoom + pan bar: dragging the handle body pans, dragging either
//! edge resizes the handle and therefore the zoom.
//!
//! Every interaction produces a [`ViewUpdate`] instead of mutating the
//! viewport, so callers can coalesce updates per frame.

use crate::config::EditorConfig;
use crate::transform::{ViewUpdate, Viewport, pixels_per_second};

const EDGE_GRIP_RATIO: f64 = 0.15;
const EDGE_GRIP_MIN_PX: f64 = 8.0;
const EDGE_GRIP_MAX_PX: f64 = 12.0;
const WHEEL_PAN_SPEED: f64 = 1.2;
const KEY_PAN_MIN_PX: f64 = 24.0;
const KEY_PAN_RATIO: f64 = 0.1;
const MIN_VISIBLE_RATIO: f64 = 1e-4;

/// Zoom level at which `ratio` of the content fits in the viewport.
pub fn zoom_from_visible_ratio(ratio: f64, viewport: &Viewport) -> f64 {
    let ratio = ratio.clamp(MIN_VISIBLE_RATIO, 1.0);
    let desired_content_width = viewport.viewport_width / ratio;
    let desired_pps = desired_content_width / viewport.total_seconds().max(MIN_VISIBLE_RATIO);
    viewport.clamp_zoom((desired_pps / viewport.base_pixels_per_second).log2())
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScrollbarDrag {
    #[default]
    Idle,
    PanningCenter {
        start_x: f64,
        start_left: f64,
    },
    ResizingLeftEdge {
        start_x: f64,
        start_left: f64,
        start_width: f64,
    },
    ResizingRightEdge {
        start_x: f64,
        start_left: f64,
        start_width: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollbarKey {
    ZoomIn,
    ZoomOut,
    PanLeft,
    PanRight,
    Home,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoomScrollbar {
    pub track_width: f64,
    pub min_handle_px: f64,
    pub enable_zoom: bool,
    pub zoom_step: f64,
    pub wheel_zoom_sensitivity: f64,
    drag: ScrollbarDrag,
}

impl ZoomScrollbar {
    pub fn new(config: &EditorConfig, track_width: f64) -> Self {
        Self {
            track_width: track_width.max(0.0),
            min_handle_px: config.scrollbar_min_handle_px,
            enable_zoom: true,
            zoom_step: config.zoom_step,
            wheel_zoom_sensitivity: config.wheel_zoom_sensitivity,
            drag: ScrollbarDrag::Idle,
        }
    }

    pub fn drag(&self) -> ScrollbarDrag {
        self.drag
    }

    pub fn visible_ratio(&self, viewport: &Viewport) -> f64 {
        let content_width = viewport.content_width();
        if content_width > 0.0 {
            (viewport.viewport_width / content_width).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    fn handle_width_for_ratio(&self, ratio: f64) -> f64 {
        (ratio * self.track_width)
            .floor()
            .min(self.track_width)
            .max(self.min_handle_px)
    }

    pub fn handle_width(&self, viewport: &Viewport) -> f64 {
        self.handle_width_for_ratio(self.visible_ratio(viewport))
    }

    fn max_handle_left(&self, handle_width: f64) -> f64 {
        (self.track_width - handle_width).max(0.0)
    }

    pub fn handle_left(&self, viewport: &Viewport) -> f64 {
        let max_scroll = viewport.max_scroll_x();
        let max_left = self.max_handle_left(self.handle_width(viewport));
        if max_scroll == 0.0 || max_left == 0.0 {
            return 0.0;
        }
        (viewport.scroll_x() / max_scroll * max_left).clamp(0.0, max_left)
    }

    /// Scroll offset matching a handle position for the given handle and
    /// content widths.
    pub fn to_scroll_x(
        &self,
        viewport: &Viewport,
        handle_left: f64,
        handle_width: f64,
        content_width: f64,
    ) -> f64 {
        let max_left = self.max_handle_left(handle_width);
        let max_scroll = (content_width - viewport.viewport_width).max(0.0);
        if max_left == 0.0 || max_scroll == 0.0 {
            return 0.0;
        }
        let ratio = handle_left.clamp(0.0, max_left) / max_left;
        (ratio * max_scroll).clamp(0.0, max_scroll)
    }

    fn content_width_at(&self, viewport: &Viewport, zoom: f64) -> f64 {
        viewport.total_seconds() * pixels_per_second(viewport.base_pixels_per_second, zoom)
    }

    /// Pointer pressed at `x` (track coordinates).
    pub fn pointer_down(&mut self, viewport: &Viewport, x: f64) -> ViewUpdate {
        let width = self.handle_width(viewport);
        let left = self.handle_left(viewport);

        if x < left || x > left + width {
            // Bare track: recentre the handle under the pointer, then pan.
            let max_left = self.max_handle_left(width);
            let centered = (x - width / 2.0).clamp(0.0, max_left);
            self.drag = ScrollbarDrag::PanningCenter {
                start_x: x,
                start_left: centered,
            };
            if max_left > 0.0 && viewport.max_scroll_x() > 0.0 {
                let scroll = self.to_scroll_x(viewport, centered, width, viewport.content_width());
                return ViewUpdate::scroll_x(scroll);
            }
            return ViewUpdate::default();
        }

        let local = x - left;
        let grip = (width * EDGE_GRIP_RATIO).clamp(EDGE_GRIP_MIN_PX, EDGE_GRIP_MAX_PX);
        self.drag = if !self.enable_zoom {
            ScrollbarDrag::PanningCenter {
                start_x: x,
                start_left: left,
            }
        } else if local <= grip {
            ScrollbarDrag::ResizingLeftEdge {
                start_x: x,
                start_left: left,
                start_width: width,
            }
        } else if local >= width - grip {
            ScrollbarDrag::ResizingRightEdge {
                start_x: x,
                start_left: left,
                start_width: width,
            }
        } else {
            ScrollbarDrag::PanningCenter {
                start_x: x,
                start_left: left,
            }
        };
        ViewUpdate::default()
    }

    pub fn pointer_move(&mut self, viewport: &Viewport, x: f64) -> ViewUpdate {
        let max_left = self.max_handle_left(self.handle_width(viewport));
        match self.drag {
            ScrollbarDrag::Idle => ViewUpdate::default(),
            ScrollbarDrag::PanningCenter {
                start_x,
                start_left,
            } => {
                let next_left = (start_left + x - start_x).clamp(0.0, max_left);
                let scroll = self.to_scroll_x(
                    viewport,
                    next_left,
                    self.handle_width(viewport),
                    viewport.content_width(),
                );
                ViewUpdate::scroll_x(scroll)
            }
            ScrollbarDrag::ResizingLeftEdge {
                start_x,
                start_left,
                start_width,
            } => {
                let dx = x - start_x;
                let next_left = (start_left + dx).clamp(0.0, max_left);
                let next_width = (start_width - dx)
                    .max(self.min_handle_px)
                    .min(self.track_width - next_left);
                self.resize_update(viewport, next_left, next_width)
            }
            ScrollbarDrag::ResizingRightEdge {
                start_x,
                start_left,
                start_width,
            } => {
                let next_width = (start_width + x - start_x)
                    .max(self.min_handle_px)
                    .min(self.track_width - start_left);
                self.resize_update(viewport, start_left, next_width)
            }
        }
    }

    fn resize_update(&self, viewport: &Viewport, next_left: f64, next_width: f64) -> ViewUpdate {
        let ratio = next_width / self.track_width.max(1.0);
        let zoom = zoom_from_visible_ratio(ratio, viewport);
        let content_width = self.content_width_at(viewport, zoom);
        ViewUpdate {
            zoom: Some(zoom),
            scroll_x: Some(self.to_scroll_x(viewport, next_left, next_width, content_width)),
            scroll_y: None,
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag = ScrollbarDrag::Idle;
    }

    /// Wheel over the bar: pans, or with a zoom modifier zooms around the
    /// point of the content under the pointer.
    pub fn wheel(
        &self,
        viewport: &Viewport,
        delta: f64,
        zoom_modifier: bool,
        pointer_x: f64,
    ) -> ViewUpdate {
        if zoom_modifier {
            if !self.enable_zoom {
                return ViewUpdate::default();
            }
            let next_zoom = viewport.clamp_zoom(viewport.zoom() - delta * self.wheel_zoom_sensitivity);
            if next_zoom == viewport.zoom() {
                return ViewUpdate::default();
            }
            let left = self.handle_left(viewport);
            let width = self.handle_width(viewport).max(1.0);
            let anchor = ((pointer_x - left) / width).clamp(0.0, 1.0) * viewport.viewport_width;
            let anchored_secs = (viewport.scroll_x() + anchor) / viewport.pixels_per_second();

            let next_pps = pixels_per_second(viewport.base_pixels_per_second, next_zoom);
            let next_max_scroll = (self.content_width_at(viewport, next_zoom) - viewport.viewport_width).max(0.0);
            let scroll = (anchored_secs * next_pps - anchor).clamp(0.0, next_max_scroll);
            return ViewUpdate {
                zoom: Some(next_zoom),
                scroll_x: Some(scroll),
                scroll_y: None,
            };
        }

        let max_scroll = viewport.max_scroll_x();
        if max_scroll == 0.0 {
            return ViewUpdate::default();
        }
        let next = (viewport.scroll_x() + delta * WHEEL_PAN_SPEED).clamp(0.0, max_scroll);
        if next == viewport.scroll_x() {
            ViewUpdate::default()
        } else {
            ViewUpdate::scroll_x(next)
        }
    }

    pub fn key(&self, viewport: &Viewport, key: ScrollbarKey) -> ViewUpdate {
        let pan_step = KEY_PAN_MIN_PX.max(viewport.viewport_width * KEY_PAN_RATIO);
        match key {
            ScrollbarKey::ZoomIn if self.enable_zoom => {
                ViewUpdate::zoom(viewport.clamp_zoom(viewport.zoom() + self.zoom_step))
            }
            ScrollbarKey::ZoomOut if self.enable_zoom => {
                ViewUpdate::zoom(viewport.clamp_zoom(viewport.zoom() - self.zoom_step))
            }
            ScrollbarKey::ZoomIn | ScrollbarKey::ZoomOut => ViewUpdate::default(),
            ScrollbarKey::PanLeft => ViewUpdate::scroll_x((viewport.scroll_x() - pan_step).max(0.0)),
            ScrollbarKey::PanRight => {
                ViewUpdate::scroll_x((viewport.scroll_x() + pan_step).min(viewport.max_scroll_x()))
            }
            ScrollbarKey::Home => ViewUpdate::scroll_x(0.0),
            ScrollbarKey::End => ViewUpdate::scroll_x(viewport.max_scroll_x()),
        }
    }
}
