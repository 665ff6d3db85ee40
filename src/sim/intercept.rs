//! Intercept (missile) animation state machine
//!
//! `idle -> active -> idle`. An active intercept advances a fixed step per
//! drawn frame regardless of elapsed time, so it always lands after
//! `ceil(1 / INTERCEPT_STEP)` frames.

use glam::DVec2;
use thiserror::Error;

use crate::consts::INTERCEPT_STEP;

/// Why a launch was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterceptError {
    #[error("intercept already in flight toward {target_id}")]
    AlreadyActive { target_id: String },
}

/// Outcome of advancing an intercept by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InterceptStep {
    /// Still travelling; `progress` in `(0, 1)`
    InFlight { progress: f64 },
    /// Reached the target this frame
    Impact,
}

/// An in-flight intercept toward one object
#[derive(Debug, Clone, PartialEq)]
pub struct Intercept {
    target_id: String,
    progress: f64,
}

impl Intercept {
    pub fn new(target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            progress: 0.0,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Advance by one frame
    pub fn step(&mut self) -> InterceptStep {
        self.progress += INTERCEPT_STEP;
        if self.progress >= 1.0 {
            InterceptStep::Impact
        } else {
            InterceptStep::InFlight {
                progress: self.progress,
            }
        }
    }
}

/// Projectile head position between `origin` and `target`
#[inline]
pub fn projectile_position(origin: DVec2, target: DVec2, progress: f64) -> DVec2 {
    origin.lerp(target, progress)
}
