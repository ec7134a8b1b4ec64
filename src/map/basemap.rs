//! Basemap catalog and tile URL expansion.

use crate::geo::TileId;

/// An immutable description of a raster basemap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasemapDefinition {
    /// Display name shown in the layer picker
    pub name: &'static str,
    /// Tile URL template with `{s}`, `{z}`, `{x}`, `{y}` and `{r}` placeholders
    pub url_template: &'static str,
    /// Attribution text for the imagery provider
    pub attribution: &'static str,
    /// Deepest zoom level served by the provider
    pub max_zoom: u8,
}

/// Available basemaps in display order. Index 0 is the default.
pub const BASEMAPS: &[BasemapDefinition] = &[
    BasemapDefinition {
        name: "Satellite",
        url_template: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
        attribution: "Esri, Maxar, Earthstar Geographics",
        max_zoom: 19,
    },
    BasemapDefinition {
        name: "Terrain",
        url_template: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
        attribution: "OpenTopoMap",
        max_zoom: 19,
    },
    BasemapDefinition {
        name: "Dark",
        url_template: "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
        attribution: "CartoDB",
        max_zoom: 19,
    },
];

/// Subdomains rotated through for `{s}`.
const SUBDOMAINS: [&str; 3] = ["a", "b", "c"];

/// Expands a tile URL template for a single tile.
///
/// `{s}` picks a subdomain from the tile coordinates so neighbouring tiles
/// spread across hosts. `{r}` is the retina suffix and expands to nothing.
pub fn tile_url(template: &str, tile: TileId) -> String {
    let subdomain = SUBDOMAINS[((tile.x + tile.y) as usize) % SUBDOMAINS.len()];

    template
        .replace("{s}", subdomain)
        .replace("{z}", &tile.z.to_string())
        .replace("{x}", &tile.x.to_string())
        .replace("{y}", &tile.y.to_string())
        .replace("{r}", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let names: Vec<_> = BASEMAPS.iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["Satellite", "Terrain", "Dark"]);
    }

    #[test]
    fn test_tile_url_arcgis_uses_row_before_column() {
        let url = tile_url(BASEMAPS[0].url_template, TileId { z: 3, x: 2, y: 5 });
        assert_eq!(
            url,
            "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/3/5/2"
        );
    }

    #[test]
    fn test_tile_url_subdomain_and_retina() {
        let url = tile_url(BASEMAPS[2].url_template, TileId { z: 4, x: 1, y: 1 });
        assert_eq!(url, "https://c.basemaps.cartocdn.com/dark_all/4/1/1.png");

        let url = tile_url(BASEMAPS[1].url_template, TileId { z: 0, x: 0, y: 0 });
        assert_eq!(url, "https://a.tile.opentopomap.org/0/0/0.png");
    }
}
