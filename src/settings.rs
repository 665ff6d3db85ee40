//! Dashboard settings and preferences
//!
//! Persisted in LocalStorage. Simulation state (scrubber, selection,
//! deflections) is never persisted.

use serde::{Deserialize, Serialize};

use crate::consts::{ZOOM_MAX, ZOOM_MIN};

/// Dashboard settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Data ===
    /// Query the live NeoWs feed instead of the simulated one
    pub live_feed: bool,
    /// NeoWs API key (DEMO_KEY is rate limited)
    pub api_key: String,

    // === Controls ===
    /// Zoom change per mouse-wheel notch
    pub wheel_zoom_step: f64,
    /// Zoom change per +/- button press
    pub button_zoom_step: f64,
    /// Scrubber advance per refresh tick while playing (percent)
    pub play_step_percent: f64,

    // === Assets ===
    /// Image drawn at the centre of the scope
    pub body_image_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            live_feed: false,
            api_key: "DEMO_KEY".to_string(),
            wheel_zoom_step: 0.1,
            button_zoom_step: 0.2,
            play_step_percent: 0.2,
            body_image_url: "assets/earth_1.png".to_string(),
        }
    }
}

impl Settings {
    /// Replace out-of-range values with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let max_step = ZOOM_MAX - ZOOM_MIN;
        if !(self.wheel_zoom_step > 0.0 && self.wheel_zoom_step <= max_step) {
            self.wheel_zoom_step = defaults.wheel_zoom_step;
        }
        if !(self.button_zoom_step > 0.0 && self.button_zoom_step <= max_step) {
            self.button_zoom_step = defaults.button_zoom_step;
        }
        if !(self.play_step_percent > 0.0 && self.play_step_percent <= 100.0) {
            self.play_step_percent = defaults.play_step_percent;
        }
        if self.api_key.trim().is_empty() {
            self.api_key = defaults.api_key;
        }
        self
    }

    /// Parse stored JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str::<Self>(json).ok().map(Self::sanitized)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "neo_radar_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                log::warn!("Stored settings unreadable, using defaults");
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
