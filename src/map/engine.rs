//! Interface to the mapping engine.
//!
//! The engine is the authority on the viewport: it renders tiles, runs
//! animations, and reports where it ended up through [`EngineEvent`]s. The
//! controller only issues requests and listens.

use crate::geo::LatLng;
use eframe::egui::{Painter, Pos2, Rect, Vec2};
use std::sync::mpsc::Sender;
use std::time::Duration;
use web_time::Instant;

/// Notification emitted by the engine once a viewport change settles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    /// Panning or flying finished; both fields come from the same moment.
    MoveEnd { center: LatLng, zoom: u8 },
    /// A zoom change finished. The center may still be moving.
    ZoomEnd { zoom: u8 },
}

/// Construction parameters for an engine instance.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    /// Initial center of the view
    pub center: LatLng,
    /// Initial zoom level
    pub zoom: u8,
    /// Size of the hosting container at construction time
    pub size: Vec2,
}

/// A live mapping engine bound to one container.
///
/// Engines are single-threaded and owned by exactly one
/// [`MapController`](super::MapController). `destroy` consumes the engine so
/// a released instance cannot be used again.
pub trait MapEngine {
    /// Handle for an attached tile layer.
    type Layer;

    /// Attaches a raster tile layer and returns its handle.
    fn add_tile_layer(&mut self, url_template: &str, max_zoom: u8) -> Self::Layer;

    /// Detaches a previously attached layer.
    fn remove_layer(&mut self, layer: Self::Layer);

    /// Zooms in by one level.
    fn zoom_in(&mut self);

    /// Zooms out by one level.
    fn zoom_out(&mut self);

    /// Starts an animated transition. Supersedes any transition in flight.
    fn fly_to(&mut self, center: LatLng, zoom: u8, duration: Duration);

    /// Current center as the engine sees it.
    fn center(&self) -> LatLng;

    /// Current zoom as the engine sees it.
    fn zoom(&self) -> u8;

    /// Registers a sink for move-end and zoom-end notifications.
    fn subscribe(&mut self, sink: Sender<EngineEvent>);

    /// Recomputes internal layout for the container's current size.
    ///
    /// Calling this with the size the engine already uses must not change
    /// anything.
    fn invalidate_size(&mut self, size: Vec2);

    /// Moves the view with a pointer drag.
    fn pan_by(&mut self, _offset: Vec2) {}

    /// Ends a pointer drag started with [`pan_by`](Self::pan_by).
    fn pan_end(&mut self) {}

    /// Advances engine-internal animations to `now`.
    fn update(&mut self, _now: Instant) {}

    /// Returns true while an animation is running.
    fn is_animating(&self) -> bool {
        false
    }

    /// Draws the current view into `rect`.
    fn paint(&self, _painter: &Painter, _rect: Rect) {}

    /// Geographic position under `pos` for a view painted into `rect`.
    fn position_at(&self, _rect: Rect, _pos: Pos2) -> Option<LatLng> {
        None
    }

    /// Releases every resource held by the engine.
    fn destroy(self);
}
