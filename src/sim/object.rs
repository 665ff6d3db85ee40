//! Near-Earth object records as the radar consumes them

use serde::{Deserialize, Serialize};

use crate::geometry::hash_to_angle;

/// One near-Earth object
///
/// Produced by the feed layer and owned by the driver. The radar only reads
/// these; the two mutable fields change through [`mark_deflected`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialObject {
    /// Opaque unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Baseline closest-approach distance (km)
    pub miss_distance_km: f64,
    /// Relative velocity (km/h)
    pub velocity_kph: f64,
    /// Closest approach as a Unix timestamp (ms)
    pub epoch_close_approach_ms: i64,
    /// Potentially hazardous asteroid flag
    pub is_hazardous: bool,
    /// Risk score, 1-99 (0 once deflected)
    pub risk_score: u8,
    /// Stable base angle derived from `id`
    pub angle_offset: f64,
    /// Set by the driver after a completed intercept
    #[serde(default)]
    pub is_deflected: bool,
    /// Mean estimated diameter (km)
    #[serde(default)]
    pub diameter_km: f64,
    /// Human-readable closest-approach time
    #[serde(default)]
    pub approach_label: String,
}

impl CelestialObject {
    /// Create a record with its base angle derived from `id`
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        let angle_offset = hash_to_angle(&id);
        Self {
            id,
            name: name.into(),
            miss_distance_km: 0.0,
            velocity_kph: 0.0,
            epoch_close_approach_ms: 0,
            is_hazardous: false,
            risk_score: 1,
            angle_offset,
            is_deflected: false,
            diameter_km: 0.0,
            approach_label: String::new(),
        }
    }

    /// Set the close-approach geometry
    pub fn with_approach(mut self, miss_distance_km: f64, velocity_kph: f64, epoch_ms: i64) -> Self {
        self.miss_distance_km = miss_distance_km;
        self.velocity_kph = velocity_kph;
        self.epoch_close_approach_ms = epoch_ms;
        self
    }

    pub fn with_risk(mut self, risk_score: u8, is_hazardous: bool) -> Self {
        self.risk_score = risk_score;
        self.is_hazardous = is_hazardous;
        self
    }
}

/// Apply a completed intercept to the driver's dataset.
///
/// Marks the object deflected and zeroes its risk. Returns `false` if no
/// object has that id.
pub fn mark_deflected(objects: &mut [CelestialObject], id: &str) -> bool {
    match objects.iter_mut().find(|o| o.id == id) {
        Some(object) => {
            object.is_deflected = true;
            object.risk_score = 0;
            log::info!("{} deflected", object.name);
            true
        }
        None => {
            log::warn!("Deflection target {} not in dataset", id);
            false
        }
    }
}
