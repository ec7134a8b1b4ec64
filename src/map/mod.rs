//! Interactive map viewport.
//!
//! This module contains the controller that owns a mapping engine for the
//! lifetime of the map panel:
//! - Engine lifecycle: one engine per mount, released on every exit path
//! - Layer registry: the basemap catalog and the single attached layer
//! - Viewport sync: center/zoom mirrored from engine notifications
//! - Resize coordination: debounced layout recomputation

mod basemap;
mod controller;
mod engine;
mod error;
mod host;
mod layers;
mod lifecycle;
mod presets;
mod resize;
mod tile_engine;
mod viewport;

#[cfg(test)]
mod testing;

pub use controller::MapController;
pub use error::MapError;
pub use host::PanelContainer;
pub use lifecycle::{InitRequest, MapPhase};
pub use presets::LOCATION_PRESETS;
pub use tile_engine::TileEngine;
pub use viewport::ViewportState;
