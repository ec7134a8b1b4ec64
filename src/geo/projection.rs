//! Web Mercator projection and slippy-map tile addressing.
//!
//! Converts between geographic coordinates (lat/lng) and world pixel
//! coordinates at a given zoom, and works out which tiles cover a
//! screen rectangle.

use eframe::egui::{Pos2, Rect, Vec2};
use geo_types::Coord;
use std::f64::consts::PI;

/// Edge length of a single tile in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the square Web Mercator world.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<LatLng> for Coord<f64> {
    fn from(value: LatLng) -> Self {
        Coord {
            x: value.lng,
            y: value.lat,
        }
    }
}

impl From<Coord<f64>> for LatLng {
    fn from(value: Coord<f64>) -> Self {
        Self {
            lat: value.y,
            lng: value.x,
        }
    }
}

/// Address of a single tile in the XYZ scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

/// Width (and height) of the world in pixels at a fractional zoom.
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

/// Projects lon/lat to world pixel coordinates at `zoom`.
pub fn project(coord: Coord<f64>, zoom: f64) -> Coord<f64> {
    let size = world_size(zoom);
    let lat = coord.y.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();

    let x = (coord.x + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;

    Coord { x, y }
}

/// Inverse of [`project`].
pub fn unproject(point: Coord<f64>, zoom: f64) -> Coord<f64> {
    let size = world_size(zoom);
    let lng = point.x / size * 360.0 - 180.0;
    let n = PI - 2.0 * PI * point.y / size;
    let lat = n.sinh().atan().to_degrees();

    Coord { x: lng, y: lat }
}

/// Snapshot of the view used to place tiles on screen.
#[derive(Debug, Clone)]
pub struct MapProjection {
    /// Center of the view
    pub center: LatLng,
    /// Fractional zoom level
    pub zoom: f64,
    /// Screen area the view is laid out for
    pub screen_rect: Rect,
}

impl MapProjection {
    pub fn new(center: LatLng, zoom: f64, screen_rect: Rect) -> Self {
        Self {
            center,
            zoom,
            screen_rect,
        }
    }

    /// Converts a screen position back to a geographic position.
    pub fn screen_to_geo(&self, pos: Pos2) -> LatLng {
        let center_px = project(self.center.into(), self.zoom);
        let offset = pos - self.screen_rect.center();

        unproject(
            Coord {
                x: center_px.x + offset.x as f64,
                y: center_px.y + offset.y as f64,
            },
            self.zoom,
        )
        .into()
    }

    /// Returns the center shifted by a screen-space offset.
    ///
    /// Dragging the map by `offset` moves the content with the pointer, so
    /// the new center lies in the opposite direction.
    pub fn center_after_pan(&self, offset: Vec2) -> LatLng {
        let center_px = project(self.center.into(), self.zoom);
        let moved = Coord {
            x: center_px.x - offset.x as f64,
            y: center_px.y - offset.y as f64,
        };
        let mut center: LatLng = unproject(moved, self.zoom).into();
        center.lng = wrap_longitude(center.lng);
        center.lat = center.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        center
    }

    /// Lists the tiles covering the screen rectangle with their screen rects.
    ///
    /// Tiles come from the integer zoom at or below the current zoom, scaled
    /// up to fill the gap. Columns wrap around the antimeridian; rows outside
    /// the world are skipped.
    pub fn visible_tiles(&self, max_zoom: u8) -> Vec<(TileId, Rect)> {
        let tile_zoom = self.zoom.floor().clamp(0.0, max_zoom as f64);
        let scale = 2f64.powf(self.zoom - tile_zoom);
        let tile_span = TILE_SIZE * scale;
        let tiles_per_axis = 2i64.pow(tile_zoom as u32);

        let center_px = project(self.center.into(), self.zoom);
        let half = self.screen_rect.size() / 2.0;
        let min_x = center_px.x - half.x as f64;
        let min_y = center_px.y - half.y as f64;
        let max_x = center_px.x + half.x as f64;
        let max_y = center_px.y + half.y as f64;

        let first_col = (min_x / tile_span).floor() as i64;
        let last_col = (max_x / tile_span).ceil() as i64;
        let first_row = ((min_y / tile_span).floor() as i64).max(0);
        let last_row = ((max_y / tile_span).ceil() as i64).min(tiles_per_axis);

        let origin = self.screen_rect.center();
        let mut tiles = Vec::new();
        for row in first_row..last_row {
            for col in first_col..last_col {
                let left = origin.x as f64 + col as f64 * tile_span - center_px.x;
                let top = origin.y as f64 + row as f64 * tile_span - center_px.y;
                let rect = Rect::from_min_size(
                    Pos2::new(left as f32, top as f32),
                    Vec2::splat(tile_span as f32),
                );
                let id = TileId {
                    z: tile_zoom as u8,
                    x: col.rem_euclid(tiles_per_axis) as u32,
                    y: row as u32,
                };
                tiles.push((id, rect));
            }
        }

        tiles
    }
}

/// Wraps a longitude into [-180, 180).
pub fn wrap_longitude(lng: f64) -> f64 {
    if (-180.0..180.0).contains(&lng) {
        return lng;
    }
    (lng + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_project_world_corners() {
        let top_left = project(Coord { x: -180.0, y: MAX_LATITUDE }, 0.0);
        assert!(top_left.x.abs() < 1e-4);
        assert!(top_left.y.abs() < 1e-4);

        let center = project(Coord { x: 0.0, y: 0.0 }, 2.0);
        assert!((center.x - 512.0).abs() < 1e-6);
        assert!((center.y - 512.0).abs() < 1e-6);
    }

    #[test]
    fn test_unproject_inverts_project() {
        let nyc = Coord {
            x: -74.006,
            y: 40.7128,
        };
        let back = unproject(project(nyc, 14.0), 14.0);
        assert!((back.x - nyc.x).abs() < EPSILON);
        assert!((back.y - nyc.y).abs() < EPSILON);
    }

    #[test]
    fn test_screen_center_maps_to_view_center() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0));
        let projection = MapProjection::new(LatLng::new(36.1069, -112.1129), 13.0, rect);

        let geo = projection.screen_to_geo(rect.center());
        assert!((geo.lat - 36.1069).abs() < 1e-6);
        assert!((geo.lng + 112.1129).abs() < 1e-6);
    }

    #[test]
    fn test_screen_to_geo_follows_screen_axes() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0));
        let projection = MapProjection::new(LatLng::new(10.0, 20.0), 6.0, rect);

        let north_east = projection.screen_to_geo(rect.center() + Vec2::new(50.0, -50.0));
        assert!(north_east.lat > 10.0);
        assert!(north_east.lng > 20.0);
    }

    #[test]
    fn test_pan_moves_center_opposite_to_drag() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(400.0, 400.0));
        let projection = MapProjection::new(LatLng::new(0.0, 0.0), 3.0, rect);

        // Dragging content to the right reveals what lies to the west
        let moved = projection.center_after_pan(Vec2::new(100.0, 0.0));
        assert!(moved.lng < 0.0);
        assert!(moved.lat.abs() < 1e-9);
    }

    #[test]
    fn test_visible_tiles_cover_screen() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(512.0, 512.0));
        let projection = MapProjection::new(LatLng::new(0.0, 0.0), 1.0, rect);

        let tiles = projection.visible_tiles(19);
        assert_eq!(tiles.len(), 4);
        assert!(tiles.iter().all(|(id, _)| id.z == 1));

        let covered = tiles
            .iter()
            .map(|(_, r)| r.area())
            .sum::<f32>();
        assert!((covered - rect.area()).abs() < 1.0);
    }

    #[test]
    fn test_visible_tiles_clamp_to_max_zoom() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(256.0, 256.0));
        let projection = MapProjection::new(LatLng::new(10.0, 10.0), 18.0, rect);

        let tiles = projection.visible_tiles(17);
        assert!(!tiles.is_empty());
        assert!(tiles.iter().all(|(id, r)| id.z == 17 && r.width() > 256.0));
    }

    #[test]
    fn test_wrap_longitude() {
        assert!((wrap_longitude(190.0) + 170.0).abs() < EPSILON);
        assert!((wrap_longitude(-190.0) - 170.0).abs() < EPSILON);
        assert!((wrap_longitude(45.0) - 45.0).abs() < EPSILON);
    }
}
