//! URL state encoding/decoding for shareable URLs.
//!
//! Encodes the map center, zoom and basemap in the URL query string so
//! reloading restores the view and URLs can be shared.

use crate::map::ViewportState;

/// Parsed URL parameters.
#[derive(Debug, Default, PartialEq)]
pub struct UrlParams {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub zoom: Option<u8>,
    pub layer: Option<usize>,
}

impl UrlParams {
    /// Parses a query string with or without the leading `?`.
    ///
    /// Unknown keys and unparsable values are ignored.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub fn parse(query: &str) -> Self {
        let mut params = UrlParams::default();

        let query = query.trim_start_matches('?');
        if query.is_empty() {
            return params;
        }

        for pair in query.split('&') {
            let mut kv = pair.splitn(2, '=');
            let key = kv.next().unwrap_or("");
            let value = kv.next().unwrap_or("");
            match key {
                "lat" => params.lat = value.parse().ok().filter(|v: &f64| v.is_finite()),
                "lng" => params.lng = value.parse().ok().filter(|v: &f64| v.is_finite()),
                "z" => params.zoom = value.parse().ok(),
                "layer" => params.layer = value.parse().ok(),
                _ => {}
            }
        }

        params
    }
}

/// Formats the query string for a viewport and basemap.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub fn format_query(viewport: &ViewportState, layer: usize) -> String {
    format!(
        "?lat={:.4}&lng={:.4}&z={}&layer={}",
        viewport.center_lat, viewport.center_lng, viewport.zoom, layer
    )
}

/// Parse URL query parameters from the current browser URL.
#[cfg(target_arch = "wasm32")]
pub fn parse_from_url() -> UrlParams {
    let Some(window) = web_sys::window() else {
        return UrlParams::default();
    };

    match window.location().search() {
        Ok(search) => UrlParams::parse(&search),
        Err(_) => UrlParams::default(),
    }
}

/// No-op stub for native builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn parse_from_url() -> UrlParams {
    UrlParams::default()
}

/// Push current state to the URL query string using `replaceState`.
#[cfg(target_arch = "wasm32")]
pub fn push_to_url(viewport: &ViewportState, layer: usize) {
    let query = format_query(viewport, layer);

    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(history) = window.history() else {
        return;
    };
    let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&query));
}

/// No-op stub for native builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn push_to_url(_viewport: &ViewportState, _layer: usize) {}
