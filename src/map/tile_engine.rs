//! In-process slippy-map engine.
//!
//! Keeps the authoritative center and zoom, animates fly-to transitions over
//! wall-clock time, and paints the attached basemap as a grid of tiles. Tile
//! imagery is not fetched; each tile is drawn as a shaded cell labelled with
//! its address and resolved URL.

use super::basemap::tile_url;
use super::engine::{EngineEvent, EngineOptions, MapEngine};
use crate::geo::{wrap_longitude, LatLng, MapProjection, TileId};
use crate::ui::colors;
use eframe::egui::{self, Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};
use std::sync::mpsc::Sender;
use std::time::Duration;
use web_time::Instant;

/// Handle for a layer attached to a [`TileEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayerId(u64);

#[derive(Debug, Clone)]
struct TileLayer {
    id: TileLayerId,
    url_template: String,
    max_zoom: u8,
}

/// An in-flight animated transition.
#[derive(Debug, Clone)]
struct Flight {
    from_center: LatLng,
    from_zoom: f64,
    to_center: LatLng,
    to_zoom: u8,
    duration: Duration,
    /// Set on the first clock tick after the request.
    started: Option<Instant>,
}

impl Flight {
    /// Position along the flight for eased progress `t` in [0, 1].
    ///
    /// Zoom dips out midway on long hops so the path stays readable.
    /// Longitude travels the short way round, across the antimeridian if
    /// that is closer.
    fn sample(&self, t: f64) -> (LatLng, f64) {
        let lng_delta = wrap_longitude(self.to_center.lng - self.from_center.lng);
        let lat = lerp(self.from_center.lat, self.to_center.lat, t);
        let lng = wrap_longitude(self.from_center.lng + lng_delta * t);

        let distance = (self.to_center.lat - self.from_center.lat).hypot(lng_delta);
        let dip = (distance.max(1e-6).log2() + 2.0).clamp(0.0, 6.0);
        let zoom = lerp(self.from_zoom, self.to_zoom as f64, t)
            - dip * (std::f64::consts::PI * t).sin();

        (LatLng::new(lat, lng), zoom.max(0.0))
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Cubic ease-in-out.
fn ease(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Slippy-map engine drawing into an egui painter.
pub struct TileEngine {
    center: LatLng,
    zoom: f64,
    size: Vec2,
    layers: Vec<TileLayer>,
    next_layer_id: u64,
    flight: Option<Flight>,
    dragging: bool,
    subscribers: Vec<Sender<EngineEvent>>,
}

/// Zoom ceiling when no layer is attached.
const DEFAULT_MAX_ZOOM: u8 = 19;

impl TileEngine {
    pub fn new(options: EngineOptions) -> Self {
        log::debug!(
            "TileEngine created: {:.0}x{:.0} at zoom {}",
            options.size.x,
            options.size.y,
            options.zoom
        );
        Self {
            center: options.center,
            zoom: options.zoom as f64,
            size: options.size,
            layers: Vec::new(),
            next_layer_id: 0,
            flight: None,
            dragging: false,
            subscribers: Vec::new(),
        }
    }

    #[cfg(test)]
    fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn max_zoom(&self) -> u8 {
        self.layers
            .last()
            .map(|l| l.max_zoom)
            .unwrap_or(DEFAULT_MAX_ZOOM)
    }

    fn emit(&mut self, event: EngineEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    fn emit_settled(&mut self, zoom_changed: bool) {
        let zoom = self.zoom();
        if zoom_changed {
            self.emit(EngineEvent::ZoomEnd { zoom });
        }
        self.emit(EngineEvent::MoveEnd {
            center: self.center,
            zoom,
        });
    }

    /// Jumps to `zoom`. A step that changes nothing leaves any flight running.
    fn set_zoom(&mut self, zoom: u8) {
        let target = zoom.min(self.max_zoom()) as f64;
        if (target - self.zoom).abs() < f64::EPSILON {
            return;
        }
        self.flight = None;
        self.zoom = target;
        self.emit_settled(true);
    }

    fn projection(&self, rect: Rect) -> MapProjection {
        MapProjection::new(self.center, self.zoom, rect)
    }
}

impl MapEngine for TileEngine {
    type Layer = TileLayerId;

    fn add_tile_layer(&mut self, url_template: &str, max_zoom: u8) -> TileLayerId {
        let id = TileLayerId(self.next_layer_id);
        self.next_layer_id += 1;
        self.layers.push(TileLayer {
            id,
            url_template: url_template.to_string(),
            max_zoom,
        });

        if self.zoom > max_zoom as f64 {
            self.set_zoom(max_zoom);
        }
        id
    }

    fn remove_layer(&mut self, layer: TileLayerId) {
        self.layers.retain(|l| l.id != layer);
    }

    fn zoom_in(&mut self) {
        let current = self.zoom.round() as u8;
        self.set_zoom(current.saturating_add(1));
    }

    fn zoom_out(&mut self) {
        let current = self.zoom.round() as u8;
        self.set_zoom(current.saturating_sub(1));
    }

    fn fly_to(&mut self, center: LatLng, zoom: u8, duration: Duration) {
        if self.flight.is_some() {
            log::debug!("Superseding in-flight transition");
        }
        self.flight = Some(Flight {
            from_center: self.center,
            from_zoom: self.zoom,
            to_center: center,
            to_zoom: zoom.min(self.max_zoom()),
            duration,
            started: None,
        });
    }

    fn center(&self) -> LatLng {
        self.center
    }

    fn zoom(&self) -> u8 {
        self.zoom.round() as u8
    }

    fn subscribe(&mut self, sink: Sender<EngineEvent>) {
        self.subscribers.push(sink);
    }

    fn invalidate_size(&mut self, size: Vec2) {
        if size == self.size {
            return;
        }
        self.size = size;
        self.emit_settled(false);
    }

    fn pan_by(&mut self, offset: Vec2) {
        self.flight = None;
        let rect = Rect::from_min_size(Pos2::ZERO, self.size);
        self.center = self.projection(rect).center_after_pan(offset);
        self.dragging = true;
    }

    fn pan_end(&mut self) {
        if std::mem::take(&mut self.dragging) {
            self.emit_settled(false);
        }
    }

    fn update(&mut self, now: Instant) {
        let Some(flight) = self.flight.as_mut() else {
            return;
        };

        let started = *flight.started.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started);
        let t = if flight.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / flight.duration.as_secs_f64()).min(1.0)
        };

        if t >= 1.0 {
            let zoom_changed = (flight.to_zoom as f64 - flight.from_zoom).abs() > f64::EPSILON;
            self.center = flight.to_center;
            self.zoom = flight.to_zoom as f64;
            self.flight = None;
            self.emit_settled(zoom_changed);
            return;
        }

        let (center, zoom) = flight.sample(ease(t));
        self.center = center;
        self.zoom = zoom;
    }

    fn is_animating(&self) -> bool {
        self.flight.is_some()
    }

    fn paint(&self, painter: &Painter, rect: Rect) {
        painter.rect_filled(rect, 0.0, colors::map::BACKGROUND);

        let Some(layer) = self.layers.last() else {
            return;
        };

        // Tiles are laid out for the size the engine last knew about. Until
        // the layout is recomputed, a grown container shows empty margins.
        let layout = Rect::from_min_size(rect.min, self.size);
        let painter = painter.with_clip_rect(rect.intersect(layout));
        let projection = self.projection(layout);
        let tint = layer_tint(&layer.url_template);

        for (tile, tile_rect) in projection.visible_tiles(layer.max_zoom) {
            paint_tile(&painter, tile, tile_rect, tint, &layer.url_template);
        }
    }

    fn position_at(&self, rect: Rect, pos: Pos2) -> Option<LatLng> {
        let layout = Rect::from_min_size(rect.min, self.size);
        layout
            .contains(pos)
            .then(|| self.projection(layout).screen_to_geo(pos))
    }

    fn destroy(mut self) {
        self.flight = None;
        self.layers.clear();
        self.subscribers.clear();
        log::debug!("TileEngine destroyed");
    }
}

/// Picks a base colour per basemap so switching layers is visible.
fn layer_tint(url_template: &str) -> Color32 {
    let hash = url_template
        .bytes()
        .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
    colors::map::TILE_TINTS[hash % colors::map::TILE_TINTS.len()]
}

fn paint_tile(painter: &Painter, tile: TileId, rect: Rect, tint: Color32, url_template: &str) {
    let fill = if (tile.x + tile.y) % 2 == 0 {
        tint
    } else {
        tint.gamma_multiply(0.85)
    };
    painter.rect_filled(rect, 0.0, fill);
    painter.rect_stroke(
        rect,
        0.0,
        Stroke::new(1.0, colors::map::TILE_GRID),
        egui::StrokeKind::Inside,
    );

    if rect.width() < 96.0 {
        return;
    }

    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        format!("{}/{}/{}", tile.z, tile.x, tile.y),
        FontId::monospace(13.0),
        colors::map::TILE_LABEL,
    );

    let url = tile_url(url_template, tile);
    let host = url
        .split("//")
        .nth(1)
        .and_then(|rest| rest.split('/').next())
        .unwrap_or(&url);
    painter.text(
        rect.center() + Vec2::new(0.0, 16.0),
        Align2::CENTER_CENTER,
        host,
        FontId::proportional(10.0),
        colors::map::TILE_LABEL.gamma_multiply(0.7),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::{channel, Receiver};

    fn engine_at(center: LatLng, zoom: u8) -> (TileEngine, Receiver<EngineEvent>) {
        let mut engine = TileEngine::new(EngineOptions {
            center,
            zoom,
            size: Vec2::new(800.0, 600.0),
        });
        let (tx, rx) = channel();
        engine.subscribe(tx);
        (engine, rx)
    }

    #[test]
    fn test_fly_to_supersedes_in_flight_request() {
        let (mut engine, rx) = engine_at(LatLng::new(40.7128, -74.006), 14);
        let grand_canyon = LatLng::new(36.1069, -112.1129);
        let fuji = LatLng::new(35.3606, 138.7274);
        let start = Instant::now();

        engine.fly_to(grand_canyon, 13, Duration::from_millis(1500));
        engine.update(start);
        engine.update(start + Duration::from_millis(500));
        engine.fly_to(fuji, 13, Duration::from_millis(1500));

        let mut now = start + Duration::from_millis(500);
        while engine.is_animating() {
            now += Duration::from_millis(100);
            engine.update(now);
        }

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events.last(),
            Some(&EngineEvent::MoveEnd {
                center: fuji,
                zoom: 13,
            })
        );
        assert!(events.iter().all(|e| match e {
            EngineEvent::MoveEnd { center, .. } => *center == fuji,
            EngineEvent::ZoomEnd { zoom } => *zoom == 13,
        }));
        assert_eq!(engine.center(), fuji);
    }

    #[test]
    fn test_flight_reports_nothing_until_it_lands() {
        let (mut engine, rx) = engine_at(LatLng::new(0.0, 0.0), 5);
        let start = Instant::now();

        engine.fly_to(LatLng::new(10.0, 10.0), 8, Duration::from_secs(1));
        engine.update(start);
        engine.update(start + Duration::from_millis(600));
        assert!(rx.try_recv().is_err());
        assert!(engine.is_animating());

        engine.update(start + Duration::from_secs(1));
        assert_eq!(rx.try_recv(), Ok(EngineEvent::ZoomEnd { zoom: 8 }));
        assert_eq!(
            rx.try_recv(),
            Ok(EngineEvent::MoveEnd {
                center: LatLng::new(10.0, 10.0),
                zoom: 8,
            })
        );
    }

    #[test]
    fn test_flight_crosses_antimeridian_when_shorter() {
        let flight = Flight {
            from_center: LatLng::new(40.7128, -74.006),
            from_zoom: 14.0,
            to_center: LatLng::new(35.3606, 138.7274),
            to_zoom: 13,
            duration: Duration::from_millis(1500),
            started: None,
        };

        // Westward over the Pacific, not eastward over Europe
        let (midway, _) = flight.sample(0.5);
        assert!(midway.lng < -74.006);
        assert!((midway.lng + 147.6393).abs() < 1e-3);

        let (late, _) = flight.sample(0.9);
        assert!(late.lng > 0.0 && late.lng < 180.0);
    }

    #[test]
    fn test_clamped_zoom_step_keeps_flight_running() {
        let (mut engine, rx) = engine_at(LatLng::new(0.0, 0.0), 0);
        let start = Instant::now();

        engine.fly_to(LatLng::new(10.0, 10.0), 0, Duration::from_secs(1));
        engine.update(start);
        engine.update(start + Duration::from_millis(400));

        engine.zoom_out();
        assert!(engine.is_animating());
        assert!(rx.try_recv().is_err());

        engine.update(start + Duration::from_secs(1));
        assert_eq!(
            rx.try_recv(),
            Ok(EngineEvent::MoveEnd {
                center: LatLng::new(10.0, 10.0),
                zoom: 0,
            })
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_zoom_steps_clamp_to_layer_max() {
        let (mut engine, rx) = engine_at(LatLng::new(0.0, 0.0), 16);
        engine.add_tile_layer("https://example.com/{z}/{x}/{y}.png", 17);

        engine.zoom_in();
        engine.zoom_in();
        assert_eq!(engine.zoom(), 17);

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.len(), 2); // only the first step changed anything

        let (mut engine, _rx) = engine_at(LatLng::new(0.0, 0.0), 0);
        engine.zoom_out();
        assert_eq!(engine.zoom(), 0);
    }

    #[test]
    fn test_invalidate_size_unchanged_is_noop() {
        let (mut engine, rx) = engine_at(LatLng::new(1.0, 2.0), 10);

        engine.invalidate_size(Vec2::new(800.0, 600.0));
        assert!(rx.try_recv().is_err());

        engine.invalidate_size(Vec2::new(500.0, 600.0));
        assert_eq!(
            rx.try_recv(),
            Ok(EngineEvent::MoveEnd {
                center: LatLng::new(1.0, 2.0),
                zoom: 10,
            })
        );
    }

    #[test]
    fn test_pan_reports_on_release() {
        let (mut engine, rx) = engine_at(LatLng::new(0.0, 0.0), 4);

        engine.pan_by(Vec2::new(-50.0, 0.0));
        engine.pan_by(Vec2::new(-50.0, 0.0));
        assert!(rx.try_recv().is_err());

        engine.pan_end();
        match rx.try_recv() {
            Ok(EngineEvent::MoveEnd { center, zoom }) => {
                assert!(center.lng > 0.0);
                assert_eq!(zoom, 4);
            }
            other => panic!("expected MoveEnd, got {:?}", other),
        }

        engine.pan_end();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_position_at_uses_known_layout() {
        let (engine, _rx) = engine_at(LatLng::new(35.3606, 138.7274), 13);
        let rect = Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(800.0, 600.0));

        let center = engine.position_at(rect, rect.center()).unwrap();
        assert!((center.lat - 35.3606).abs() < 1e-6);
        assert!((center.lng - 138.7274).abs() < 1e-6);

        // Outside the laid-out area until the size is recomputed
        let grown = Rect::from_min_size(rect.min, Vec2::new(1200.0, 600.0));
        assert!(engine
            .position_at(grown, grown.min + Vec2::new(1000.0, 10.0))
            .is_none());
    }

    #[test]
    fn test_layers_attach_and_detach() {
        let (mut engine, _rx) = engine_at(LatLng::new(0.0, 0.0), 4);

        let first = engine.add_tile_layer("a", 19);
        assert_eq!(engine.layer_count(), 1);
        engine.remove_layer(first);
        let _second = engine.add_tile_layer("b", 19);
        assert_eq!(engine.layer_count(), 1);
    }
}
