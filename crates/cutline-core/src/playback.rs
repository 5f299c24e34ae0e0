use serde::{Deserialize, Serialize};
use tracing::debug;

/// Transport state: whether the playhead is running and where it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackClock {
    is_playing: bool,
    current_time: f64,
    duration: f64,
}

impl PlaybackClock {
    pub fn new(duration: f64) -> Self {
        Self {
            is_playing: false,
            current_time: 0.0,
            duration: duration.max(0.0),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration.max(0.0);
    }

    pub fn play(&mut self) {
        self.is_playing = true;
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    pub fn toggle(&mut self) -> bool {
        self.is_playing = !self.is_playing;
        self.is_playing
    }

    /// Move the playhead. Times before zero land on zero.
    pub fn seek(&mut self, time: f64) {
        self.current_time = time.max(0.0);
    }

    /// Advance a running clock by `dt` seconds, stopping at the duration.
    pub fn tick(&mut self, dt: f64) {
        if !self.is_playing {
            return;
        }
        let next = self.current_time + dt.max(0.0);
        if next >= self.duration {
            self.current_time = self.duration;
            self.is_playing = false;
            debug!(duration = self.duration, "playback reached end");
        } else {
            self.current_time = next;
        }
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new(30.0)
    }
}
