//! Deterministic radar model
//!
//! Everything in here is pure given its inputs:
//! - Simulated time comes from the scrubber, wall-clock time is always passed in
//! - No rendering or platform dependencies
//! - Object records are read-only apart from the deflection contract

pub mod clock;
pub mod intercept;
pub mod object;
pub mod orbit;
pub mod viewport;

pub use clock::{Playback, SimulationClock};
pub use intercept::{Intercept, InterceptError, InterceptStep};
pub use object::{CelestialObject, mark_deflected};
pub use orbit::{Projection, effective_distance_km, project};
pub use viewport::Viewport;
