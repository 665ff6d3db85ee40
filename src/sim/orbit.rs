//! Polar placement of objects on the radar
//!
//! Not real orbital mechanics. Each object recedes from its closest-approach
//! distance as simulated time moves away from the approach epoch, and sweeps
//! around the centre with an angular rate that falls off as 1/sqrt(distance).
//! Two angular terms coexist:
//! - wall-clock drift, so the scene keeps moving while the scrubber is still
//! - simulated-time drift, so scrubbing also rotates the scene

use glam::DVec2;

use super::object::CelestialObject;
use super::viewport::Viewport;
use crate::consts::*;
use crate::geometry::polar_to_cartesian;

/// Where an object sits on screen for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Screen position (px)
    pub pos: DVec2,
    /// Distance from the canvas centre (px)
    pub pixel_radius: f64,
    /// Current polar angle (radians, unwrapped)
    pub angle: f64,
    /// Marker radius, also the hit-test basis (px)
    pub screen_radius: f64,
    /// Distance after recession and deflection (km)
    pub effective_distance_km: f64,
    /// Simulated hours from closest approach (negative before it)
    pub delta_hours: f64,
}

impl Projection {
    /// Within one simulated hour of closest approach
    #[inline]
    pub fn is_near_closest_approach(&self) -> bool {
        self.delta_hours.abs() < 1.0
    }
}

/// Miss distance adjusted for elapsed simulated time and deflection
pub fn effective_distance_km(object: &CelestialObject, sim_time_ms: f64) -> f64 {
    let delta_hours = hours_from_approach(object, sim_time_ms);
    let added_km = delta_hours.abs() * object.velocity_kph * VISUAL_SPEED_FACTOR;
    let deflection_km = if object.is_deflected { DEFLECTION_OFFSET_KM } else { 0.0 };
    object.miss_distance_km + added_km + deflection_km
}

#[inline]
fn hours_from_approach(object: &CelestialObject, sim_time_ms: f64) -> f64 {
    (sim_time_ms - object.epoch_close_approach_ms as f64) / MS_PER_HOUR
}

/// Project `object` onto the screen.
///
/// Pure in its inputs: the same object, simulated time, wall clock, start time
/// and viewport always give the same projection.
pub fn project(
    object: &CelestialObject,
    sim_time_ms: f64,
    wall_clock_ms: f64,
    sim_start_ms: f64,
    viewport: &Viewport,
    selected: bool,
) -> Projection {
    let zoom = viewport.zoom_level();
    let delta_hours = hours_from_approach(object, sim_time_ms);
    let distance_km = effective_distance_km(object, sim_time_ms);

    let pixel_radius =
        distance_km * viewport.base_scale_factor() * zoom + viewport.earth_buffer_px();

    // Clamp keeps the rate finite for an object sitting exactly on the centre
    let angular_rate = 1.0 / distance_km.max(1.0).sqrt();
    let wall_clock_factor = (wall_clock_ms - sim_start_ms) / WALL_CLOCK_DIVISOR;
    let angle = object.angle_offset
        + wall_clock_factor * angular_rate * ANGULAR_RATE_GAIN
        + sim_time_ms / SIM_TIME_DIVISOR;

    let pos = viewport.center() + polar_to_cartesian(pixel_radius, angle);

    let base_radius = if object.is_hazardous {
        MARKER_RADIUS_HAZARDOUS
    } else {
        MARKER_RADIUS_DEFAULT
    };
    let screen_radius = if selected {
        base_radius + MARKER_SELECTED_GROWTH
    } else {
        base_radius
    };

    Projection {
        pos,
        pixel_radius,
        angle,
        screen_radius,
        effective_distance_km: distance_km,
        delta_hours,
    }
}
