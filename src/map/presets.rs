//! Fly-to destinations offered above the map.

use crate::geo::LatLng;

/// A named viewport destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationPreset {
    pub label: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
}

impl LocationPreset {
    pub fn center(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

pub const LOCATION_PRESETS: &[LocationPreset] = &[
    LocationPreset {
        label: "New York City",
        lat: 40.7128,
        lng: -74.006,
        zoom: 14,
    },
    LocationPreset {
        label: "San Francisco",
        lat: 37.7749,
        lng: -122.4194,
        zoom: 14,
    },
    LocationPreset {
        label: "UT Dallas",
        lat: 32.9857,
        lng: -96.7503,
        zoom: 16,
    },
    LocationPreset {
        label: "Grand Canyon",
        lat: 36.1069,
        lng: -112.1129,
        zoom: 13,
    },
    LocationPreset {
        label: "Mount Fuji",
        lat: 35.3606,
        lng: 138.7274,
        zoom: 13,
    },
    LocationPreset {
        label: "Amazon Basin",
        lat: -3.4653,
        lng: -62.2159,
        zoom: 10,
    },
];

