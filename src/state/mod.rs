//! Application state management.
//!
//! Holds the dashboard state that lives outside the map controller:
//! startup settings, URL parameters, and panel visibility.

mod persist;
mod settings;
pub mod url_state;

pub use persist::{PersistAction, PersistGate};
pub use settings::MapSettings;

use crate::geo::LatLng;
use url_state::UrlParams;

/// Root application state.
#[derive(Default)]
pub struct AppState {
    /// Persisted view settings
    pub settings: MapSettings,

    /// Basemap other than the default to apply once the map is ready
    pub requested_layer: Option<usize>,

    /// Whether the assistant side panel is shown
    pub assistant_open: bool,

    /// Application status message displayed in top bar
    pub status_message: String,
}

impl AppState {
    pub fn new(settings: MapSettings, url_params: UrlParams) -> Self {
        let mut settings = settings;

        // URL parameters take precedence over stored settings
        if let Some(lat) = url_params.lat {
            settings.center_lat = lat.clamp(-85.0, 85.0);
        }
        if let Some(lng) = url_params.lng {
            settings.center_lng = crate::geo::wrap_longitude(lng);
        }
        if let Some(zoom) = url_params.zoom {
            settings.zoom = zoom.min(MapSettings::MAX_ZOOM);
        }

        let requested_layer = url_params
            .layer
            .or_else(|| (settings.basemap != 0).then_some(settings.basemap));

        Self {
            assistant_open: settings.assistant_open,
            requested_layer,
            settings,
            status_message: "Loading map".to_string(),
        }
    }

    /// Where the map should open.
    pub fn initial_view(&self) -> (LatLng, u8) {
        (self.settings.center(), self.settings.zoom)
    }
}
