//! UI modules for the GeoView dashboard.
//!
//! The UI is split into distinct panels:
//! - Top bar: Title, status, and assistant toggle
//! - Central map panel: Location presets, map view, controls and overlays
//! - Right panel: Assistant placeholder

mod assistant_panel;
pub mod colors;
mod map_panel;
mod top_bar;

pub use assistant_panel::render_assistant_panel;
pub use map_panel::render_map_panel;
pub use top_bar::render_top_bar;
