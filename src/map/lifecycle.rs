//! Engine lifecycle phases and the hand-off of asynchronously built engines.
//!
//! Engine construction may finish after the frame that asked for it. The
//! builder receives an [`InitRequest`] and hands the finished engine back
//! through [`InitRequest::resolve`]. If the mount that issued the request
//! has ended by then, the engine is destroyed on the spot instead of being
//! adopted.

use super::engine::{EngineOptions, MapEngine};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Lifecycle of the map viewport.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum MapPhase {
    /// No engine yet; the container may not be attached.
    #[default]
    Uninitialized,
    /// Engine construction requested but not adopted yet.
    Initializing,
    /// Engine owned and accepting operations.
    Ready,
    /// Engine released. Terminal.
    TornDown,
}

impl MapPhase {
    pub fn label(&self) -> &'static str {
        match self {
            MapPhase::Uninitialized => "Uninitialized",
            MapPhase::Initializing => "Initializing",
            MapPhase::Ready => "Ready",
            MapPhase::TornDown => "Torn down",
        }
    }

    /// Whether the loading indicator should be shown.
    pub fn is_loading(&self) -> bool {
        matches!(self, MapPhase::Uninitialized | MapPhase::Initializing)
    }
}

/// Shared "this mount is still current" flag.
///
/// Cleared exactly once, at teardown. Clones observe the same flag.
#[derive(Clone, Debug)]
pub struct MountToken(Rc<Cell<bool>>);

impl MountToken {
    pub(super) fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_current(&self) -> bool {
        self.0.get()
    }

    pub(super) fn revoke(&self) {
        self.0.set(false);
    }
}

/// Slot where a resolved engine waits to be adopted by its controller.
pub(super) type EngineSlot<E> = Rc<RefCell<Option<E>>>;

/// A pending request to construct an engine for one mount.
#[must_use = "an InitRequest must be resolved with a constructed engine"]
pub struct InitRequest<E: MapEngine> {
    options: EngineOptions,
    token: MountToken,
    slot: EngineSlot<E>,
}

impl<E: MapEngine> InitRequest<E> {
    pub(super) fn new(options: EngineOptions, token: MountToken, slot: EngineSlot<E>) -> Self {
        Self {
            options,
            token,
            slot,
        }
    }

    /// Parameters the engine should be constructed with.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Whether the issuing mount is still current.
    pub fn is_current(&self) -> bool {
        self.token.is_current()
    }

    /// Hands a constructed engine back to the controller.
    ///
    /// If the mount ended while the engine was being built, the engine is
    /// destroyed here and nothing reaches the controller.
    pub fn resolve(self, engine: E) {
        if !self.token.is_current() {
            log::info!("Map unmounted before engine construction finished; destroying engine");
            engine.destroy();
            return;
        }

        if let Some(stale) = self.slot.borrow_mut().replace(engine) {
            log::warn!("Replacing an unadopted engine; destroying the older instance");
            stale.destroy();
        }
    }
}
