//! Test doubles for the map engine and its host container.

use super::engine::{EngineEvent, EngineOptions, MapEngine};
use super::host::HostContainer;
use crate::geo::LatLng;
use eframe::egui::Vec2;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::mpsc::Sender;
use std::time::Duration;

#[derive(Default)]
struct EngineLog {
    constructed: usize,
    destroyed: usize,
    next_layer: u32,
    attached: Vec<(u32, String)>,
    attach_count: usize,
    operations: Vec<String>,
    invalidations: Vec<Vec2>,
    fly_requests: usize,
    subscribers: Vec<Sender<EngineEvent>>,
}

/// Shared view into every engine built from it.
#[derive(Clone, Default)]
pub struct EngineSpy(Rc<RefCell<EngineLog>>);

impl EngineSpy {
    pub fn build(&self, options: EngineOptions) -> RecordingEngine {
        self.0.borrow_mut().constructed += 1;
        RecordingEngine {
            center: options.center,
            zoom: options.zoom,
            log: self.0.clone(),
        }
    }

    /// Sends a notification as if the engine had emitted it.
    pub fn emit(&self, event: EngineEvent) {
        self.0
            .borrow_mut()
            .subscribers
            .retain(|tx| tx.send(event).is_ok());
    }

    pub fn constructed(&self) -> usize {
        self.0.borrow().constructed
    }

    pub fn destroyed(&self) -> usize {
        self.0.borrow().destroyed
    }

    /// URL templates of the layers currently attached.
    pub fn attached(&self) -> Vec<String> {
        self.0
            .borrow()
            .attached
            .iter()
            .map(|(_, url)| url.clone())
            .collect()
    }

    pub fn attach_count(&self) -> usize {
        self.0.borrow().attach_count
    }

    pub fn operations(&self) -> Vec<String> {
        self.0.borrow().operations.clone()
    }

    pub fn invalidations(&self) -> Vec<Vec2> {
        self.0.borrow().invalidations.clone()
    }

    pub fn fly_requests(&self) -> usize {
        self.0.borrow().fly_requests
    }
}

/// Engine double that records every call into its spy.
pub struct RecordingEngine {
    center: LatLng,
    zoom: u8,
    log: Rc<RefCell<EngineLog>>,
}

impl MapEngine for RecordingEngine {
    type Layer = u32;

    fn add_tile_layer(&mut self, url_template: &str, _max_zoom: u8) -> u32 {
        let mut log = self.log.borrow_mut();
        let id = log.next_layer;
        log.next_layer += 1;
        log.attached.push((id, url_template.to_string()));
        log.attach_count += 1;
        log.operations.push(format!("attach {}", url_template));
        id
    }

    fn remove_layer(&mut self, layer: u32) {
        let mut log = self.log.borrow_mut();
        if let Some(pos) = log.attached.iter().position(|(id, _)| *id == layer) {
            let (_, url) = log.attached.remove(pos);
            log.operations.push(format!("detach {}", url));
        }
    }

    fn zoom_in(&mut self) {
        self.log.borrow_mut().operations.push("zoom in".to_string());
    }

    fn zoom_out(&mut self) {
        self.log.borrow_mut().operations.push("zoom out".to_string());
    }

    fn fly_to(&mut self, _center: LatLng, _zoom: u8, _duration: Duration) {
        self.log.borrow_mut().fly_requests += 1;
    }

    fn center(&self) -> LatLng {
        self.center
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    fn subscribe(&mut self, sink: Sender<EngineEvent>) {
        self.log.borrow_mut().subscribers.push(sink);
    }

    fn invalidate_size(&mut self, size: Vec2) {
        self.log.borrow_mut().invalidations.push(size);
    }

    fn destroy(self) {
        let mut log = self.log.borrow_mut();
        log.destroyed += 1;
        log.subscribers.clear();
    }
}

/// Container double with a settable attachment state.
pub struct FakeContainer {
    size: Option<Vec2>,
    fullscreen: Cell<bool>,
}

impl FakeContainer {
    pub fn attached(width: f32, height: f32) -> Self {
        Self {
            size: Some(Vec2::new(width, height)),
            fullscreen: Cell::new(false),
        }
    }

    pub fn detached() -> Self {
        Self {
            size: None,
            fullscreen: Cell::new(false),
        }
    }
}

impl HostContainer for FakeContainer {
    fn is_attached(&self) -> bool {
        self.size.is_some()
    }

    fn size(&self) -> Option<Vec2> {
        self.size
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen.get()
    }

    fn request_fullscreen(&self) {
        self.fullscreen.set(true);
    }

    fn exit_fullscreen(&self) {
        self.fullscreen.set(false);
    }
}
