//! The map viewport controller.
//!
//! Owns one engine instance for the lifetime of a mount, keeps the basemap
//! attached, mirrors the engine's viewport, and forwards container resizes.
//! User operations only take effect in [`MapPhase::Ready`].

use super::basemap::{BasemapDefinition, BASEMAPS};
use super::engine::{EngineOptions, MapEngine};
use super::error::MapError;
use super::host::HostContainer;
use super::layers::LayerRegistry;
use super::lifecycle::{EngineSlot, InitRequest, MapPhase, MountToken};
use super::presets::LocationPreset;
use super::resize::ResizeCoordinator;
use super::viewport::{ViewportState, ViewportSync};
use crate::geo::LatLng;
use eframe::egui::{Painter, Pos2, Rect, Vec2};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::channel;
use std::time::Duration;
use web_time::Instant;

/// Duration of preset fly-to animations.
pub const FLY_DURATION: Duration = Duration::from_millis(1500);

/// Presentation flags for the map chrome.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub struct UiFlags {
    pub layer_picker_open: bool,
    pub is_fullscreen: bool,
}

/// Controller for one interactive map viewport.
pub struct MapController<E: MapEngine> {
    phase: MapPhase,
    engine: Option<E>,
    pending: EngineSlot<E>,
    mount: Option<MountToken>,
    layers: LayerRegistry<E::Layer>,
    viewport: ViewportSync,
    resize: ResizeCoordinator,
    /// Container size the pending engine is being built for.
    built_for: Option<Vec2>,
    /// Fullscreen state last reported by the host.
    host_fullscreen: bool,
    flags: UiFlags,
}

impl<E: MapEngine> Default for MapController<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: MapEngine> MapController<E> {
    pub fn new() -> Self {
        Self::with_catalog(BASEMAPS)
    }

    pub fn with_catalog(catalog: &'static [BasemapDefinition]) -> Self {
        Self {
            phase: MapPhase::Uninitialized,
            engine: None,
            pending: Rc::new(RefCell::new(None)),
            mount: None,
            layers: LayerRegistry::new(catalog),
            viewport: ViewportSync::default(),
            resize: ResizeCoordinator::default(),
            built_for: None,
            host_fullscreen: false,
            flags: UiFlags::default(),
        }
    }

    pub fn phase(&self) -> MapPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == MapPhase::Ready
    }

    /// Viewport last reported by the engine. `None` until the engine is adopted.
    pub fn viewport(&self) -> Option<&ViewportState> {
        self.viewport.state()
    }

    pub fn basemaps(&self) -> &'static [BasemapDefinition] {
        self.layers.catalog()
    }

    pub fn active_layer(&self) -> usize {
        self.layers.active_index()
    }

    pub fn active_basemap(&self) -> &'static BasemapDefinition {
        self.layers.active_definition()
    }

    pub fn flags(&self) -> UiFlags {
        self.flags
    }

    pub fn toggle_layer_picker(&mut self) {
        self.flags.layer_picker_open = !self.flags.layer_picker_open;
    }

    /// Whether the host should keep repainting (animation or pending resize).
    pub fn needs_repaint(&self) -> bool {
        self.engine.as_ref().is_some_and(|e| e.is_animating()) || self.resize.is_pending()
    }

    /// Time until pending resize work is due, if any.
    pub fn resize_due_in(&self, now: Instant) -> Option<Duration> {
        self.resize.time_until_due(now)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Requests engine construction for this mount.
    ///
    /// Returns `None` without changing anything when the container is not
    /// attached yet, when an engine already exists, or when this controller
    /// has moved past `Uninitialized`. Repeated calls are harmless.
    pub fn initialize<C: HostContainer>(
        &mut self,
        container: &C,
        center: LatLng,
        zoom: u8,
    ) -> Option<InitRequest<E>> {
        if self.phase != MapPhase::Uninitialized || self.engine.is_some() {
            return None;
        }

        let Some(size) = container.size().filter(|_| container.is_attached()) else {
            log::debug!("Map container not attached yet; deferring initialization");
            return None;
        };

        let token = MountToken::new();
        self.mount = Some(token.clone());
        self.phase = MapPhase::Initializing;
        self.built_for = Some(size);
        log::info!(
            "Initializing map at ({:.4}, {:.4}) zoom {}",
            center.lat,
            center.lng,
            zoom
        );

        Some(InitRequest::new(
            EngineOptions { center, zoom, size },
            token,
            self.pending.clone(),
        ))
    }

    /// Per-frame pump: adopts a resolved engine, advances engine animations,
    /// applies engine notifications, and runs due resize work.
    pub fn poll(&mut self, now: Instant) {
        if self.phase == MapPhase::Initializing {
            let resolved = self.pending.borrow_mut().take();
            if let Some(engine) = resolved {
                self.adopt(engine);
            }
        }

        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        engine.update(now);
        self.viewport.drain();

        if let Some(size) = self.resize.poll(now) {
            log::debug!("Recomputing map layout for {:.0}x{:.0}", size.x, size.y);
            engine.invalidate_size(size);
            self.viewport.drain();
        }
    }

    fn adopt(&mut self, mut engine: E) {
        let (sender, receiver) = channel();
        engine.subscribe(sender);
        self.layers.attach_default(&mut engine);
        self.viewport.attach(&engine, receiver);
        // Resizes seen while the engine was being built are measured against
        // the size it was built for.
        if let Some(size) = self.built_for.take() {
            self.resize.reset(size);
        }
        self.engine = Some(engine);
        self.phase = MapPhase::Ready;
        log::info!("Map ready with basemap: {}", self.layers.active_definition().name);
    }

    /// Releases the engine and everything attached to it.
    ///
    /// Valid from every phase and idempotent. An engine still waiting in the
    /// hand-off slot is destroyed too, and a request still in flight will
    /// destroy its engine when it resolves.
    pub fn teardown(&mut self) {
        if self.phase == MapPhase::TornDown {
            return;
        }

        if let Some(token) = self.mount.take() {
            token.revoke();
        }
        if self.resize.cancel() {
            log::debug!("Cancelled pending map resize");
        }
        self.viewport.detach();

        let parked = self.pending.borrow_mut().take();
        if let Some(engine) = parked {
            engine.destroy();
        }

        if let Some(mut engine) = self.engine.take() {
            self.layers.detach(&mut engine);
            engine.destroy();
            log::info!("Map engine destroyed");
        }

        self.built_for = None;
        self.flags = UiFlags::default();
        self.phase = MapPhase::TornDown;
    }

    // ------------------------------------------------------------------
    // Operations (Ready only)
    // ------------------------------------------------------------------

    fn engine_mut(&mut self) -> Result<&mut E, MapError> {
        match (self.phase, self.engine.as_mut()) {
            (MapPhase::Ready, Some(engine)) => Ok(engine),
            (phase, _) => Err(MapError::NotReady(phase)),
        }
    }

    /// Switches the basemap and closes the layer picker.
    pub fn switch_layer(&mut self, index: usize) -> Result<(), MapError> {
        let Some(engine) = self.engine.as_mut().filter(|_| self.phase == MapPhase::Ready) else {
            return Err(MapError::NotReady(self.phase));
        };

        let switched = self.layers.switch(engine, index)?;
        if switched {
            log::info!("Switched basemap to {}", self.layers.active_definition().name);
        }
        self.flags.layer_picker_open = false;
        Ok(())
    }

    pub fn zoom_in(&mut self) -> Result<(), MapError> {
        self.engine_mut()?.zoom_in();
        Ok(())
    }

    pub fn zoom_out(&mut self) -> Result<(), MapError> {
        self.engine_mut()?.zoom_out();
        Ok(())
    }

    /// Starts an animated flight to `preset`.
    ///
    /// The mirrored viewport changes only when the engine reports the end
    /// of the flight.
    pub fn fly_to(&mut self, preset: &LocationPreset) -> Result<(), MapError> {
        log::debug!("Flying to {}", preset.label);
        self.engine_mut()?
            .fly_to(preset.center(), preset.zoom, FLY_DURATION);
        Ok(())
    }

    pub fn drag_by(&mut self, offset: Vec2) -> Result<(), MapError> {
        self.engine_mut()?.pan_by(offset);
        Ok(())
    }

    pub fn drag_end(&mut self) -> Result<(), MapError> {
        self.engine_mut()?.pan_end();
        Ok(())
    }

    /// Enters or leaves fullscreen depending on the container's current state.
    pub fn toggle_fullscreen<C: HostContainer>(&mut self, container: &C) -> Result<(), MapError> {
        self.engine_mut()?;

        if container.is_fullscreen() {
            container.exit_fullscreen();
            self.flags.is_fullscreen = false;
        } else {
            container.request_fullscreen();
            self.flags.is_fullscreen = true;
        }
        Ok(())
    }

    /// Feeds the container's current size to the resize coordinator.
    ///
    /// Observations before initialization only set the baseline; while the
    /// engine is being built they are ignored.
    pub fn observe_container(&mut self, size: Vec2, now: Instant) {
        match self.phase {
            MapPhase::Uninitialized => self.resize.reset(size),
            MapPhase::Ready => {
                self.resize.observe(size, now);
            }
            MapPhase::Initializing | MapPhase::TornDown => {}
        }
    }

    /// Picks up fullscreen changes made by the host itself (Esc, window
    /// controls). Call once per frame.
    pub fn sync_fullscreen<C: HostContainer>(&mut self, container: &C) {
        let fullscreen = container.is_fullscreen();
        if fullscreen == self.host_fullscreen {
            return;
        }
        self.host_fullscreen = fullscreen;
        if self.phase == MapPhase::Ready && self.flags.is_fullscreen != fullscreen {
            log::debug!("Host changed fullscreen to {}", fullscreen);
            self.flags.is_fullscreen = fullscreen;
        }
    }

    /// Draws the engine's view. Does nothing unless ready.
    pub fn paint(&self, painter: &Painter, rect: Rect) {
        if let (MapPhase::Ready, Some(engine)) = (self.phase, self.engine.as_ref()) {
            engine.paint(painter, rect);
        }
    }

    /// Geographic position under the pointer, for the coordinates overlay.
    pub fn position_at(&self, rect: Rect, pos: Pos2) -> Option<LatLng> {
        match (self.phase, self.engine.as_ref()) {
            (MapPhase::Ready, Some(engine)) => engine.position_at(rect, pos),
            _ => None,
        }
    }
}

impl<E: MapEngine> Drop for MapController<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}
