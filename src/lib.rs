//! NEO Radar - near-Earth object radar dashboard
//!
//! Core modules:
//! - `geometry`: Hashing, range mapping and hit-test helpers
//! - `sim`: Deterministic model (objects, viewport, clocks, orbits, intercepts)
//! - `radar`: Frame renderer owning viewport, clock and intercept state
//! - `renderer`: Canvas abstraction, palette and backends
//! - `feed`: NeoWs decoding, risk scoring and the fallback dataset
//! - `settings`: User preferences persisted to LocalStorage

pub mod feed;
pub mod geometry;
pub mod radar;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use radar::{FrameReport, Radar, RadarEvent};
pub use settings::Settings;
pub use sim::{CelestialObject, InterceptError};

/// Radar configuration constants
pub mod consts {
    /// Length of the scrubbable window (7 days)
    pub const SIM_DURATION_MS: f64 = 7.0 * 24.0 * 60.0 * 60.0 * 1000.0;
    pub const MS_PER_HOUR: f64 = 3_600_000.0;

    /// Outward push applied to deflected objects
    pub const DEFLECTION_OFFSET_KM: f64 = 15_000_000.0;
    /// Scale floor so a sparse dataset never collapses the scale
    pub const MIN_MAX_DISTANCE_KM: f64 = 5_000_000.0;
    /// Headroom above the furthest object
    pub const SCALE_HEADROOM: f64 = 1.2;
    /// Pixels reserved between the outermost ring and the canvas edge
    pub const EDGE_MARGIN_PX: f64 = 80.0;

    /// Zoom bounds
    pub const ZOOM_MIN: f64 = 0.5;
    pub const ZOOM_MAX: f64 = 5.0;

    /// Recession speed damping (objects drift from closest approach at half speed)
    pub const VISUAL_SPEED_FACTOR: f64 = 0.5;
    /// Pixels kept clear around the central body, per zoom unit
    pub const EARTH_BUFFER_PX: f64 = 40.0;
    /// Wall-clock divisor for the always-on angular drift
    pub const WALL_CLOCK_DIVISOR: f64 = 5_000_000.0;
    /// Multiplier on the distance-dependent angular rate
    pub const ANGULAR_RATE_GAIN: f64 = 100.0;
    /// Simulated-time divisor for the scrubber-driven angular drift
    pub const SIM_TIME_DIVISOR: f64 = 1_000_000_000.0;

    /// Marker radii
    pub const MARKER_RADIUS_HAZARDOUS: f64 = 6.0;
    pub const MARKER_RADIUS_DEFAULT: f64 = 4.0;
    pub const MARKER_SELECTED_GROWTH: f64 = 8.0;
    /// Extra pixels accepted around a marker when hit-testing
    pub const HIT_TOLERANCE_PX: f64 = 10.0;

    /// Intercept progress per frame (50 frames to impact)
    pub const INTERCEPT_STEP: f64 = 0.02;
    /// Central body rotation per drawn frame (radians)
    pub const BODY_ROTATION_STEP: f64 = 0.002;
    /// Central body image size at zoom 1
    pub const BODY_IMAGE_SIZE_PX: f64 = 60.0;
    /// Placeholder disc radius at zoom 1 while the image loads
    pub const BODY_PLACEHOLDER_RADIUS_PX: f64 = 20.0;

    /// Risk thresholds for marker colouring and labels
    pub const RISK_HIGH: u8 = 60;
    pub const RISK_MEDIUM: u8 = 30;
}
