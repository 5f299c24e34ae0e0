//! Snapping policies.
//!
//! Proximity snapping pulls a time onto a nearby clip edge or ruler tick when
//! it lands within a few pixels. Grid snapping rounds a drop position to a
//! coarse zoom-dependent interval.

use uuid::Uuid;

use crate::timeline::Timeline;

/// Pixel tolerance absorbed when comparing a distance against the threshold,
/// so an edge exactly `threshold` pixels away still snaps despite float noise.
const THRESHOLD_SLACK_PX: f64 = 1e-6;

/// Grid intervals in seconds, keyed by the minimum pixels-per-second at which
/// they apply.
const GRID_STEPS: [(f64, f64); 7] = [
    (160.0, 0.25),
    (80.0, 0.5),
    (40.0, 1.0),
    (16.0, 2.0),
    (8.0, 5.0),
    (4.0, 10.0),
    (2.0, 15.0),
];
const COARSEST_GRID_SECS: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapStrategy {
    Proximity { threshold_px: f64 },
    Grid,
}

/// Category of snap target; clip edges win ties against ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTargetKind {
    ClipEdge,
    Tick,
}

impl SnapTargetKind {
    fn priority(self) -> u8 {
        match self {
            SnapTargetKind::ClipEdge => 2,
            SnapTargetKind::Tick => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTarget {
    pub time: f64,
    pub kind: SnapTargetKind,
}

impl SnapTarget {
    pub fn clip_edge(time: f64) -> Self {
        Self {
            time,
            kind: SnapTargetKind::ClipEdge,
        }
    }

    pub fn tick(time: f64) -> Self {
        Self {
            time,
            kind: SnapTargetKind::Tick,
        }
    }
}

/// Gather clip edges (minus the dragged clip) and tick times as targets.
pub fn collect_targets(
    timeline: &Timeline,
    ticks: impl IntoIterator<Item = f64>,
    exclude: &[Uuid],
) -> Vec<SnapTarget> {
    timeline
        .clip_edges(exclude)
        .into_iter()
        .map(SnapTarget::clip_edge)
        .chain(ticks.into_iter().map(SnapTarget::tick))
        .collect()
}

/// Nearest target within `threshold_px`, or `raw` when none qualifies.
pub fn snap_proximity(
    raw: f64,
    targets: &[SnapTarget],
    pixels_per_second: f64,
    threshold_px: f64,
) -> f64 {
    let mut best: Option<(f64, SnapTarget)> = None;
    for target in targets {
        let distance_px = (target.time - raw).abs() * pixels_per_second;
        if distance_px > threshold_px + THRESHOLD_SLACK_PX {
            continue;
        }
        let better = match best {
            None => true,
            Some((best_px, best_target)) => {
                distance_px + THRESHOLD_SLACK_PX < best_px
                    || ((distance_px - best_px).abs() <= THRESHOLD_SLACK_PX
                        && target.kind.priority() > best_target.kind.priority())
            }
        };
        if better {
            best = Some((distance_px, *target));
        }
    }
    best.map(|(_, t)| t.time).unwrap_or(raw)
}

/// Grid interval for drag-and-drop placement at a given scale.
pub fn grid_interval(pixels_per_second: f64) -> f64 {
    GRID_STEPS
        .iter()
        .find(|(min_pps, _)| pixels_per_second >= *min_pps)
        .map(|(_, secs)| *secs)
        .unwrap_or(COARSEST_GRID_SECS)
}

pub fn snap_to_grid(raw: f64, pixels_per_second: f64) -> f64 {
    let interval = grid_interval(pixels_per_second);
    ((raw / interval).round() * interval).max(0.0)
}

/// Resolve a raw time under a strategy. `precise` bypasses snapping.
pub fn resolve(
    raw: f64,
    strategy: SnapStrategy,
    targets: &[SnapTarget],
    pixels_per_second: f64,
    precise: bool,
) -> f64 {
    let raw = raw.max(0.0);
    if precise {
        return raw;
    }
    match strategy {
        SnapStrategy::Proximity { threshold_px } => {
            snap_proximity(raw, targets, pixels_per_second, threshold_px)
        }
        SnapStrategy::Grid => snap_to_grid(raw, pixels_per_second),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_edge_beats_tick_on_tie() {
        let targets = [SnapTarget::tick(5.0), SnapTarget::clip_edge(5.04)];
        let snapped = snap_proximity(5.02, &targets, 100.0, 8.0);
        assert_eq!(snapped, 5.04);
    }

    #[test]
    fn test_nearest_wins() {
        let targets = [SnapTarget::clip_edge(5.0), SnapTarget::clip_edge(5.1)];
        assert_eq!(snap_proximity(5.07, &targets, 100.0, 8.0), 5.1);
    }

    #[test]
    fn test_grid_interval_coarsens_with_zoom_out() {
        assert_eq!(grid_interval(400.0), 0.25);
        assert_eq!(grid_interval(20.0), 2.0);
        assert_eq!(grid_interval(1.0), 30.0);
    }

    #[test]
    fn test_precise_returns_floored_raw() {
        let targets = [SnapTarget::clip_edge(0.0)];
        let strategy = SnapStrategy::Proximity { threshold_px: 8.0 };
        assert_eq!(resolve(-1.0, strategy, &targets, 100.0, true), 0.0);
        assert_eq!(resolve(0.03, strategy, &targets, 100.0, true), 0.03);
    }
}
