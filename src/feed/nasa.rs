//! NASA NeoWs `feed` response shape
//!
//! Only the fields the radar uses are decoded. Distances and velocities come
//! as decimal strings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeoFeed {
    #[serde(default)]
    pub element_count: u32,
    /// Objects grouped by calendar date (`YYYY-MM-DD`)
    pub near_earth_objects: BTreeMap<String, Vec<Neo>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neo {
    pub id: String,
    pub name: String,
    pub is_potentially_hazardous_asteroid: bool,
    pub estimated_diameter: EstimatedDiameter,
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproach>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatedDiameter {
    pub kilometers: DiameterRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

impl DiameterRange {
    pub fn mean(&self) -> f64 {
        (self.estimated_diameter_min + self.estimated_diameter_max) / 2.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseApproach {
    pub epoch_date_close_approach: i64,
    pub relative_velocity: RelativeVelocity,
    pub miss_distance: MissDistance,
    #[serde(default)]
    pub orbiting_body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelativeVelocity {
    pub kilometers_per_hour: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissDistance {
    pub kilometers: String,
}

impl NeoFeed {
    /// All objects across dates, in date order
    pub fn objects(&self) -> impl Iterator<Item = &Neo> {
        self.near_earth_objects.values().flatten()
    }
}
