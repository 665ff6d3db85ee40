//! Simulated time and the scrubber that drives it

use crate::consts::SIM_DURATION_MS;

/// Maps a normalized scrubber position onto a fixed 7-day window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    start_ms: f64,
    duration_ms: f64,
    current_ms: f64,
}

impl SimulationClock {
    /// Start the window at `start_ms` (wall clock at initialization)
    pub fn new(start_ms: f64) -> Self {
        Self {
            start_ms,
            duration_ms: SIM_DURATION_MS,
            current_ms: start_ms,
        }
    }

    /// Move to `progress` through the window (clamped to `[0, 1]`)
    pub fn set_progress(&mut self, progress: f64) {
        let progress = if progress.is_finite() { progress.clamp(0.0, 1.0) } else { 0.0 };
        self.current_ms = self.start_ms + progress * self.duration_ms;
    }

    #[inline]
    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }

    #[inline]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    #[inline]
    pub fn current_ms(&self) -> f64 {
        self.current_ms
    }
}

/// Play/pause state of the time scrubber, in percent like the slider
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Playback {
    percent: f64,
    playing: bool,
}

impl Playback {
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Scrubber position as `[0, 1]`
    pub fn normalized(&self) -> f64 {
        self.percent / 100.0
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Jump to a slider position
    pub fn seek(&mut self, percent: f64) {
        self.percent = if percent.is_finite() { percent.clamp(0.0, 100.0) } else { 0.0 };
    }

    /// Flip play/pause, returning the new playing state
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Advance one refresh tick, wrapping past 100% back to 0%.
    ///
    /// Does nothing while paused.
    pub fn advance(&mut self, step_percent: f64) {
        if !self.playing {
            return;
        }
        self.percent += step_percent;
        if self.percent > 100.0 {
            self.percent = 0.0;
        }
    }

    /// Back to the start of the window (new dataset)
    pub fn rewind(&mut self) {
        self.percent = 0.0;
    }
}
