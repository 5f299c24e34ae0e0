//! `HH:MM:SS:FF` timecode formatting and parsing.

use crate::error::{CoreError, Result};

pub const DEFAULT_FPS: u32 = 30;
pub const TIMECODE_PLACEHOLDER: &str = "--:--:--:--";

/// Format seconds as `HH:MM:SS:FF`. Frames come from the fractional part,
/// rounded to the nearest frame.
pub fn format_timecode(seconds: f64, fps: u32) -> String {
    if !seconds.is_finite() || seconds < 0.0 || fps == 0 {
        return TIMECODE_PLACEHOLDER.to_string();
    }
    let fps = u64::from(fps);
    let total_frames = (seconds * fps as f64).round() as u64;
    let frames = total_frames % fps;
    let total_secs = total_frames / fps;
    let (h, m, s) = (total_secs / 3600, (total_secs / 60) % 60, total_secs % 60);
    format!("{h:02}:{m:02}:{s:02}:{frames:02}")
}

/// Format whole seconds as `HH:MM:SS`.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
}

fn clamp_field(value: f64, max: f64) -> f64 {
    value.floor().clamp(0.0, max)
}

/// Parse `HH:MM:SS:FF`, `HH:MM:SS` or `MM:SS` into seconds.
///
/// Out-of-range fields are clamped rather than rejected; minutes in the
/// two-part form may run to 99.
pub fn parse_timecode(input: &str, fps: u32) -> Result<f64> {
    let invalid = || CoreError::InvalidTimecode(input.to_string());
    if input.trim().is_empty() {
        return Err(invalid());
    }
    let fields = input
        .split(':')
        .map(|part| {
            let part = part.trim();
            match part.parse::<f64>() {
                Ok(n) if !part.is_empty() && n.is_finite() && n >= 0.0 => Ok(n),
                _ => Err(invalid()),
            }
        })
        .collect::<Result<Vec<f64>>>()?;

    let seconds = match fields.as_slice() {
        [h, m, s, f] => {
            let fps = fps.max(1) as f64;
            clamp_field(*h, 99.0) * 3600.0
                + clamp_field(*m, 59.0) * 60.0
                + clamp_field(*s, 59.0)
                + clamp_field(*f, fps - 1.0) / fps
        }
        [h, m, s] => clamp_field(*h, 99.0) * 3600.0 + clamp_field(*m, 59.0) * 60.0 + clamp_field(*s, 59.0),
        [m, s] => clamp_field(*m, 99.0) * 60.0 + clamp_field(*s, 59.0),
        _ => return Err(invalid()),
    };
    Ok(seconds)
}
