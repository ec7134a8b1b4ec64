//! Mirror of the engine's viewport.
//!
//! The engine is the only writer. Its notifications arrive over a channel
//! and are applied strictly in the order they were sent, so a later
//! notification always wins over an earlier one.

use super::engine::{EngineEvent, MapEngine};
use crate::geo::LatLng;
use std::sync::mpsc::Receiver;

/// Center and zoom last reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
}

impl ViewportState {
    pub fn center(&self) -> LatLng {
        LatLng::new(self.center_lat, self.center_lng)
    }
}

/// Applies engine notifications to the mirrored viewport.
#[derive(Default)]
pub struct ViewportSync {
    state: Option<ViewportState>,
    receiver: Option<Receiver<EngineEvent>>,
}

impl ViewportSync {
    pub fn state(&self) -> Option<&ViewportState> {
        self.state.as_ref()
    }

    /// Starts mirroring a freshly adopted engine.
    ///
    /// Reads the engine's current viewport once, then listens on `receiver`.
    pub fn attach<E: MapEngine>(&mut self, engine: &E, receiver: Receiver<EngineEvent>) {
        let center = engine.center();
        self.state = Some(ViewportState {
            center_lat: center.lat,
            center_lng: center.lng,
            zoom: engine.zoom(),
        });
        self.receiver = Some(receiver);
    }

    /// Stops listening. The last mirrored state is kept for display.
    pub fn detach(&mut self) {
        self.receiver = None;
    }

    /// Applies every queued notification in arrival order.
    ///
    /// Returns the number of notifications applied.
    pub fn drain(&mut self) -> usize {
        let Some(receiver) = self.receiver.as_ref() else {
            return 0;
        };

        let events: Vec<EngineEvent> = receiver.try_iter().collect();
        for event in &events {
            self.apply(*event);
        }
        events.len()
    }

    /// Applies a single notification.
    pub fn apply(&mut self, event: EngineEvent) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            EngineEvent::MoveEnd { center, zoom } => {
                *state = ViewportState {
                    center_lat: center.lat,
                    center_lng: center.lng,
                    zoom,
                };
            }
            EngineEvent::ZoomEnd { zoom } => {
                state.zoom = zoom;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    fn seeded() -> ViewportSync {
        ViewportSync {
            state: Some(ViewportState {
                center_lat: 40.7128,
                center_lng: -74.006,
                zoom: 14,
            }),
            receiver: None,
        }
    }

    #[test]
    fn test_move_end_overwrites_center_and_zoom() {
        let mut sync = seeded();
        sync.apply(EngineEvent::MoveEnd {
            center: LatLng::new(1.0, 2.0),
            zoom: 5,
        });
        assert_eq!(
            sync.state(),
            Some(&ViewportState {
                center_lat: 1.0,
                center_lng: 2.0,
                zoom: 5,
            })
        );
    }

    #[test]
    fn test_zoom_end_keeps_center() {
        let mut sync = seeded();
        sync.apply(EngineEvent::ZoomEnd { zoom: 9 });
        let state = sync.state().unwrap();
        assert_eq!(state.zoom, 9);
        assert_eq!(state.center(), LatLng::new(40.7128, -74.006));
    }

    #[test]
    fn test_drain_applies_in_send_order() {
        let (tx, rx) = channel();
        let mut sync = seeded();
        sync.receiver = Some(rx);

        tx.send(EngineEvent::MoveEnd {
            center: LatLng::new(10.0, 10.0),
            zoom: 3,
        })
        .unwrap();
        tx.send(EngineEvent::ZoomEnd { zoom: 4 }).unwrap();
        tx.send(EngineEvent::MoveEnd {
            center: LatLng::new(20.0, 30.0),
            zoom: 6,
        })
        .unwrap();
        tx.send(EngineEvent::ZoomEnd { zoom: 7 }).unwrap();

        assert_eq!(sync.drain(), 4);
        assert_eq!(
            sync.state(),
            Some(&ViewportState {
                center_lat: 20.0,
                center_lng: 30.0,
                zoom: 7,
            })
        );
    }

    #[test]
    fn test_events_ignored_before_attach_and_after_detach() {
        let mut sync = ViewportSync::default();
        sync.apply(EngineEvent::ZoomEnd { zoom: 3 });
        assert!(sync.state().is_none());

        let (tx, rx) = channel();
        let mut sync = seeded();
        sync.receiver = Some(rx);
        sync.detach();
        assert!(tx.send(EngineEvent::ZoomEnd { zoom: 1 }).is_err());
        assert_eq!(sync.drain(), 0);
        assert_eq!(sync.state().unwrap().zoom, 14);
    }
}
