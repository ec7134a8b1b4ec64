//! Centralized color constants for the UI.
//!
//! This module provides consistent colors across all UI panels.

use eframe::egui::Color32;

/// General UI colors for labels and values.
pub mod ui {
    use super::Color32;

    /// Muted gray for secondary labels.
    pub const LABEL: Color32 = Color32::from_rgb(130, 130, 140);
    /// Slightly brighter for values.
    pub const VALUE: Color32 = Color32::from_rgb(200, 200, 210);
    /// Emphasized color for active states.
    pub const ACTIVE: Color32 = Color32::from_rgb(100, 180, 255);
    /// Background of the BETA tag.
    pub const TAG_BG: Color32 = Color32::from_rgb(45, 45, 58);
}

/// Colors for the map viewport and its overlays.
pub mod map {
    use super::Color32;

    /// Shown behind tiles and while loading.
    pub const BACKGROUND: Color32 = Color32::from_rgb(20, 20, 35);
    /// Tile border.
    pub const TILE_GRID: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 60);
    /// Tile address text.
    pub const TILE_LABEL: Color32 = Color32::from_rgb(230, 230, 235);
    /// Base tint per basemap.
    pub const TILE_TINTS: [Color32; 3] = [
        Color32::from_rgb(52, 74, 58),
        Color32::from_rgb(96, 86, 62),
        Color32::from_rgb(34, 36, 48),
    ];
    /// Translucent card behind overlays.
    pub const OVERLAY_BG: Color32 = Color32::from_rgba_premultiplied(22, 22, 30, 220);
    /// Overlay text.
    pub const OVERLAY_TEXT: Color32 = Color32::from_rgb(220, 220, 230);
}
