//! Geographic math for the map viewport.
//!
//! This module provides the Web Mercator projection used to lay out
//! basemap tiles and to convert between screen and geographic positions.

mod projection;

pub use projection::{wrap_longitude, LatLng, MapProjection, TileId};
