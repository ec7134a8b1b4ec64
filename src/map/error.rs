//! Rejected map operations.

use super::lifecycle::MapPhase;

/// Reasons a map operation was refused.
///
/// None of these are fatal: a refused operation leaves the viewport in its
/// last valid state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// The engine is not ready (still loading, or already torn down).
    NotReady(MapPhase),
    /// The requested basemap index is outside the catalog.
    LayerOutOfRange { index: usize, len: usize },
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::NotReady(phase) => write!(f, "Map not ready (phase: {})", phase.label()),
            MapError::LayerOutOfRange { index, len } => {
                write!(f, "Basemap index {} out of range (catalog has {})", index, len)
            }
        }
    }
}

impl std::error::Error for MapError {}
