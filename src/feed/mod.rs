//! Data layer feeding the radar
//!
//! Decodes the NeoWs feed, scores each object and guarantees the driver a
//! non-empty dataset: offline mode and every live failure fall back to a
//! scripted set.

pub mod fallback;
#[cfg(target_arch = "wasm32")]
pub mod fetch;
pub mod nasa;

pub use fallback::fallback_feed;
#[cfg(target_arch = "wasm32")]
pub use fetch::fetch_objects;
pub use nasa::NeoFeed;

use thiserror::Error;

use crate::sim::CelestialObject;

const NEOWS_FEED_URL: &str = "https://api.nasa.gov/neo/rest/v1/feed";
const FEED_WINDOW_MS: i64 = 7 * 24 * 60 * 60 * 1000;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Http(String),
    #[error("feed decode failed: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("object {id}: {field} is not a number ({value:?})")]
    InvalidNumber {
        id: String,
        field: &'static str,
        value: String,
    },
    #[error("feed contains no objects")]
    Empty,
}

/// Where a loaded dataset came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSource {
    Live,
    /// Offline mode
    Simulated,
    /// Live mode failed and fell back
    Fallback,
}

impl FeedSource {
    /// Status line shown next to the feed indicator
    pub fn status_text(&self) -> &'static str {
        match self {
            FeedSource::Live => "LIVE FEED ACTIVE",
            FeedSource::Simulated => "OFFLINE SIMULATION",
            FeedSource::Fallback => "CONNECTION ERROR",
        }
    }

    /// CSS class for the feed indicator dot
    pub fn status_class(&self) -> &'static str {
        match self {
            FeedSource::Live => "status-dot active",
            FeedSource::Simulated => "status-dot",
            FeedSource::Fallback => "status-dot error",
        }
    }
}

/// A dataset ready for the radar, never empty
#[derive(Debug, Clone)]
pub struct LoadedFeed {
    pub objects: Vec<CelestialObject>,
    pub source: FeedSource,
}

/// Risk score in `[1, 99]`
pub fn risk_score(hazardous: bool, miss_km: f64, diameter_km: f64, velocity_kph: f64) -> u8 {
    let mut risk = if hazardous { 50.0 } else { 0.0 };
    if miss_km < 10_000_000.0 {
        risk += (1.0 - miss_km / 10_000_000.0) * 40.0;
    }
    if diameter_km > 0.05 {
        risk += (diameter_km * 50.0).min(20.0);
    }
    if velocity_kph > 50_000.0 {
        risk += 5.0;
    }
    risk.round().clamp(1.0, 99.0) as u8
}

/// `YYYY-MM-DD HH:MM:SS` (UTC)
pub fn approach_label(epoch_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(epoch_ms)
        .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Feed URL for the 7-day window starting at `now_ms`
pub fn feed_url(now_ms: i64, api_key: &str) -> String {
    let day = |ms: i64| {
        chrono::DateTime::from_timestamp_millis(ms)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };
    format!(
        "{}?start_date={}&end_date={}&api_key={}",
        NEOWS_FEED_URL,
        day(now_ms),
        day(now_ms + FEED_WINDOW_MS),
        api_key
    )
}

pub fn decode(json: &str) -> Result<NeoFeed, FeedError> {
    Ok(serde_json::from_str(json)?)
}

/// Turn a decoded feed into radar objects, highest risk first.
///
/// Objects without close-approach data are skipped.
pub fn process(feed: &NeoFeed) -> Result<Vec<CelestialObject>, FeedError> {
    let mut objects = Vec::new();
    for neo in feed.objects() {
        let Some(approach) = neo.close_approach_data.first() else {
            log::warn!("Skipping {}: no close-approach data", neo.id);
            continue;
        };

        let miss_km = parse_number(&neo.id, "miss_distance", &approach.miss_distance.kilometers)?;
        let velocity_kph = parse_number(
            &neo.id,
            "relative_velocity",
            &approach.relative_velocity.kilometers_per_hour,
        )?;
        let diameter_km = neo.estimated_diameter.kilometers.mean();
        let epoch_ms = approach.epoch_date_close_approach;

        let mut object = CelestialObject::new(neo.id.as_str(), neo.name.replace(['(', ')'], ""))
            .with_approach(miss_km, velocity_kph, epoch_ms)
            .with_risk(
                risk_score(neo.is_potentially_hazardous_asteroid, miss_km, diameter_km, velocity_kph),
                neo.is_potentially_hazardous_asteroid,
            );
        object.diameter_km = diameter_km;
        object.approach_label = approach_label(epoch_ms);
        objects.push(object);
    }

    if objects.is_empty() {
        return Err(FeedError::Empty);
    }
    objects.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));
    log::info!("Processed {} objects", objects.len());
    Ok(objects)
}

/// The scripted dataset, already processed
pub fn fallback_objects(now_ms: i64, seed: u64) -> Vec<CelestialObject> {
    match process(&fallback_feed(now_ms, seed)) {
        Ok(objects) => objects,
        Err(e) => {
            // Scripted values always parse; reaching here is a bug in the table
            log::error!("Fallback dataset invalid: {}", e);
            Vec::new()
        }
    }
}

fn parse_number(id: &str, field: &'static str, value: &str) -> Result<f64, FeedError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FeedError::InvalidNumber {
            id: id.to_string(),
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "element_count": 3,
        "near_earth_objects": {
            "2025-10-10": [
                {
                    "id": "3542519",
                    "name": "(2010 PK9)",
                    "is_potentially_hazardous_asteroid": true,
                    "estimated_diameter": {
                        "kilometers": { "estimated_diameter_min": 0.1, "estimated_diameter_max": 0.3 }
                    },
                    "close_approach_data": [{
                        "epoch_date_close_approach": 1760089200000,
                        "relative_velocity": { "kilometers_per_hour": "55000.5" },
                        "miss_distance": { "kilometers": "2500000.25" },
                        "orbiting_body": "Earth"
                    }]
                }
            ],
            "2025-10-09": [
                {
                    "id": "54016476",
                    "name": "(2020 GB)",
                    "is_potentially_hazardous_asteroid": false,
                    "estimated_diameter": {
                        "kilometers": { "estimated_diameter_min": 0.01, "estimated_diameter_max": 0.02 }
                    },
                    "close_approach_data": [{
                        "epoch_date_close_approach": 1760000000000,
                        "relative_velocity": { "kilometers_per_hour": "20000" },
                        "miss_distance": { "kilometers": "30000000" }
                    }]
                },
                {
                    "id": "9999",
                    "name": "No Approach",
                    "is_potentially_hazardous_asteroid": false,
                    "estimated_diameter": {
                        "kilometers": { "estimated_diameter_min": 0.01, "estimated_diameter_max": 0.02 }
                    },
                    "close_approach_data": []
                }
            ]
        }
    }"#;

    #[test]
    fn test_risk_score_components() {
        // Hazardous, 2.5M km, 0.2 km, fast: 50 + 30 + 10 + 5
        assert_eq!(risk_score(true, 2_500_000.0, 0.2, 55_000.0), 95);
        // Nothing qualifies: clamped up to 1
        assert_eq!(risk_score(false, 30_000_000.0, 0.01, 20_000.0), 1);
        // Everything maxed: clamped down to 99
        assert_eq!(risk_score(true, 0.0, 5.0, 90_000.0), 99);
        // Diameter bonus caps at 20
        assert_eq!(risk_score(false, 20_000_000.0, 1.0, 0.0), 20);
    }

    #[test]
    fn test_process_sample_feed() {
        let feed = decode(SAMPLE).unwrap();
        let objects = process(&feed).unwrap();
        assert_eq!(objects.len(), 2);

        let first = &objects[0];
        assert_eq!(first.id, "3542519");
        assert_eq!(first.name, "2010 PK9");
        assert!(first.is_hazardous);
        assert_eq!(first.risk_score, 95);
        assert!((first.miss_distance_km - 2_500_000.25).abs() < 1e-9);
        assert!((first.diameter_km - 0.2).abs() < 1e-12);
        assert_eq!(first.approach_label, "2025-10-10 09:40:00");

        assert_eq!(objects[1].name, "2020 GB");
        assert_eq!(objects[1].risk_score, 1);
    }

    #[test]
    fn test_invalid_number_is_reported() {
        let broken = SAMPLE.replace("\"2500000.25\"", "\"far away\"");
        let feed = decode(&broken).unwrap();
        match process(&feed) {
            Err(FeedError::InvalidNumber { id, field, .. }) => {
                assert_eq!(id, "3542519");
                assert_eq!(field, "miss_distance");
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_feed() {
        let feed = decode(r#"{"element_count": 0, "near_earth_objects": {}}"#).unwrap();
        assert!(matches!(process(&feed), Err(FeedError::Empty)));
    }

    #[test]
    fn test_decode_error() {
        assert!(matches!(decode("{not json"), Err(FeedError::Decode(_))));
    }

    #[test]
    fn test_fallback_objects_sorted_by_risk() {
        let objects = fallback_objects(1_760_000_000_000, 3);
        assert_eq!(objects.len(), 8);
        assert!(objects.windows(2).all(|w| w[0].risk_score >= w[1].risk_score));
        let apophis = objects.iter().find(|o| o.name == "Apophis Sim").unwrap();
        assert!(apophis.is_hazardous);
    }

    #[test]
    fn test_feed_url() {
        let url = feed_url(1_760_000_000_000, "DEMO_KEY");
        assert_eq!(
            url,
            "https://api.nasa.gov/neo/rest/v1/feed?start_date=2025-10-09&end_date=2025-10-16&api_key=DEMO_KEY"
        );
    }
}
