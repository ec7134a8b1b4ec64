//! Map view settings.
//!
//! Settings are persisted to localStorage so the last view survives page
//! reloads. Native builds always start from the defaults.

use crate::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Startup view and panel preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Latitude the map opens at.
    pub center_lat: f64,
    /// Longitude the map opens at.
    pub center_lng: f64,
    /// Zoom level the map opens at.
    pub zoom: u8,
    /// Basemap catalog index the map opens with.
    pub basemap: usize,
    /// Whether the assistant panel starts open.
    pub assistant_open: bool,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            // New York City
            center_lat: 40.7128,
            center_lng: -74.006,
            zoom: 14,
            basemap: 0,
            assistant_open: true,
        }
    }
}

impl MapSettings {
    /// localStorage key for persisting settings.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    const STORAGE_KEY: &'static str = "geoview_map_settings";

    /// Deepest zoom accepted from persisted or URL state.
    pub const MAX_ZOOM: u8 = 19;

    pub fn center(&self) -> LatLng {
        LatLng::new(self.center_lat, self.center_lng)
    }

    /// Parses settings JSON, falling back to defaults on malformed input.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Self>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Failed to parse map settings: {}", e);
                Self::default()
            }
        }
    }

    /// Clamps values that would put the map somewhere it cannot show.
    fn sanitized(mut self) -> Self {
        if !self.center_lat.is_finite() || !self.center_lng.is_finite() {
            let defaults = Self::default();
            self.center_lat = defaults.center_lat;
            self.center_lng = defaults.center_lng;
        }
        self.center_lat = self.center_lat.clamp(-85.0, 85.0);
        self.center_lng = crate::geo::wrap_longitude(self.center_lng);
        self.zoom = self.zoom.min(Self::MAX_ZOOM);
        self
    }

    /// Load settings from localStorage.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return Self::default(),
        };

        let storage = match window.local_storage() {
            Ok(Some(s)) => s,
            _ => return Self::default(),
        };

        let json = match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(s)) => s,
            _ => return Self::default(),
        };

        log::info!("Loaded map settings from localStorage");
        Self::from_json(&json)
    }

    /// Save settings to localStorage.
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return,
        };

        let storage = match window.local_storage() {
            Ok(Some(s)) => s,
            _ => return,
        };

        let json = match serde_json::to_string(self) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Failed to serialize map settings: {}", e);
                return;
            }
        };

        if let Err(e) = storage.set_item(Self::STORAGE_KEY, &json) {
            log::warn!("Failed to save map settings: {:?}", e);
        }
    }

    /// Native builds have no settings store.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}
