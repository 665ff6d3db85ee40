//! Scripted dataset used offline or whenever the live feed fails

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::collections::BTreeMap;

use super::nasa::{
    CloseApproach, DiameterRange, EstimatedDiameter, MissDistance, Neo, NeoFeed, RelativeVelocity,
};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// (name, hazardous, min diameter km, velocity km/h, miss distance km, days ahead)
const SCRIPTED: [(&str, bool, f64, f64, f64, i64); 8] = [
    ("2025 XG2", true, 0.4, 68_000.0, 1_500_000.0, 1),
    ("2025 WA3", true, 0.31, 64_000.0, 3_400_000.0, 2),
    ("2021 AB", false, 0.05, 22_000.0, 8_000_000.0, 0),
    ("Apophis (Sim)", true, 0.34, 55_000.0, 200_000.0, 3),
    ("2025 YY", false, 0.02, 18_000.0, 12_000_000.0, 4),
    ("Voyager Rock", false, 0.01, 15_000.0, 500_000.0, 1),
    ("Comet Z", true, 0.8, 98_000.0, 4_500_000.0, 6),
    ("Zeus", true, 1.2, 76_000.0, 15_000_000.0, 5),
];

/// Build the fallback feed relative to `now_ms`.
///
/// Ids come from a `Pcg32` seeded with `seed`, so the same seed always
/// produces the same dataset. Never empty.
pub fn fallback_feed(now_ms: i64, seed: u64) -> NeoFeed {
    let mut rng = Pcg32::seed_from_u64(seed);
    let neos: Vec<Neo> = SCRIPTED
        .iter()
        .map(|&(name, hazardous, diameter, velocity, miss, days)| Neo {
            id: rng.random_range(0..1_000_000u32).to_string(),
            name: name.to_string(),
            is_potentially_hazardous_asteroid: hazardous,
            estimated_diameter: EstimatedDiameter {
                kilometers: DiameterRange {
                    estimated_diameter_min: diameter,
                    estimated_diameter_max: diameter + 0.1,
                },
            },
            close_approach_data: vec![CloseApproach {
                epoch_date_close_approach: now_ms + days * MS_PER_DAY,
                relative_velocity: RelativeVelocity {
                    kilometers_per_hour: velocity.to_string(),
                },
                miss_distance: MissDistance {
                    kilometers: miss.to_string(),
                },
                orbiting_body: "Earth".to_string(),
            }],
        })
        .collect();

    let date = chrono::DateTime::from_timestamp_millis(now_ms)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    NeoFeed {
        element_count: neos.len() as u32,
        near_earth_objects: BTreeMap::from([(date, neos)]),
    }
}
