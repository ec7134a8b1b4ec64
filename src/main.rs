#![warn(clippy::all)]

//! GeoView - An aerial imagery dashboard.
//!
//! The dashboard centers on an interactive basemap viewport: switchable
//! satellite, terrain and dark basemaps, animated flights to preset
//! locations, and a shareable URL that tracks the current view.

mod geo;
mod map;
mod state;
mod ui;

use eframe::egui;
use map::{InitRequest, MapController, MapPhase, PanelContainer, TileEngine, ViewportState};
use state::{AppState, MapSettings, PersistAction, PersistGate};

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions::default();

    eframe::run_native(
        "GeoView",
        native_options,
        Box::new(|cc| Ok(Box::new(GeoViewApp::new(cc)))),
    )
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` messages to `console.log`:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("app_canvas")
            .expect("Failed to find app_canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("app_canvas was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(GeoViewApp::new(cc)))),
            )
            .await;

        // Remove the loading text once the app has loaded:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

/// Main application state and logic.
pub struct GeoViewApp {
    /// Dashboard state outside the map
    state: AppState,

    /// The interactive map viewport
    map: MapController<TileEngine>,

    /// Throttle for URL and settings writes of the view (viewport and basemap)
    persist: PersistGate<(ViewportState, usize)>,
}

impl GeoViewApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings = MapSettings::load();
        let url_params = state::url_state::parse_from_url();
        let state = AppState::new(settings, url_params);

        let (center, zoom) = state.initial_view();
        log::info!(
            "Starting GeoView at ({:.4}, {:.4}) zoom {}",
            center.lat,
            center.lng,
            zoom
        );

        Self {
            state,
            map: MapController::new(),
            persist: PersistGate::new(web_time::Instant::now()),
        }
    }

    /// Applies a basemap requested at startup once the map can accept it.
    fn apply_requested_layer(&mut self) {
        if !self.map.is_ready() {
            return;
        }
        if let Some(index) = self.state.requested_layer.take() {
            if let Err(e) = self.map.switch_layer(index) {
                log::warn!("Ignoring requested basemap: {}", e);
            }
        }
    }

    fn update_status(&mut self) {
        let status = match self.map.phase() {
            MapPhase::Uninitialized | MapPhase::Initializing => "Loading map".to_string(),
            MapPhase::Ready => format!("Basemap: {}", self.map.active_basemap().name),
            MapPhase::TornDown => "Map closed".to_string(),
        };
        if self.state.status_message != status {
            self.state.status_message = status;
        }
    }

    /// Writes the view to the URL and settings when it has settled somewhere new.
    fn persist_view(&mut self, ctx: &egui::Context, now: web_time::Instant) {
        let Some(viewport) = self.map.viewport().copied() else {
            return;
        };
        let layer = self.map.active_layer();
        match self.persist.check((viewport, layer), now) {
            PersistAction::Unchanged => return,
            PersistAction::Defer(wait) => {
                ctx.request_repaint_after(wait);
                return;
            }
            PersistAction::Write => {}
        }

        state::url_state::push_to_url(&viewport, layer);

        self.state.settings.center_lat = viewport.center_lat;
        self.state.settings.center_lng = viewport.center_lng;
        self.state.settings.zoom = viewport.zoom;
        self.state.settings.basemap = layer;
        self.state.settings.save();
    }
}

/// Builds the engine for an initialization request and hands it back.
#[cfg(not(target_arch = "wasm32"))]
fn spawn_engine(ctx: &egui::Context, request: InitRequest<TileEngine>) {
    let engine = TileEngine::new(request.options().clone());
    request.resolve(engine);
    ctx.request_repaint();
}

/// Builds the engine off the current frame and hands it back.
#[cfg(target_arch = "wasm32")]
fn spawn_engine(ctx: &egui::Context, request: InitRequest<TileEngine>) {
    let ctx = ctx.clone();
    wasm_bindgen_futures::spawn_local(async move {
        if !request.is_current() {
            log::debug!("Map unmounted before engine construction; skipping");
            return;
        }
        let engine = TileEngine::new(request.options().clone());
        request.resolve(engine);
        ctx.request_repaint();
    });
}

impl eframe::App for GeoViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = web_time::Instant::now();

        self.map.poll(now);
        self.map.sync_fullscreen(&PanelContainer::new(ctx, None));
        self.apply_requested_layer();
        self.update_status();
        self.persist_view(ctx, now);

        // Render UI panels in the correct order for egui layout
        // Side and top/bottom panels must be rendered before CentralPanel
        if !self.map.flags().is_fullscreen {
            ui::render_top_bar(ctx, &mut self.state);
            if self.state.assistant_open {
                ui::render_assistant_panel(ctx, &mut self.state);
            }
        }
        let map_rect = ui::render_map_panel(ctx, &mut self.map, now);

        if self.map.phase() == MapPhase::Uninitialized {
            let (center, zoom) = self.state.initial_view();
            let container = PanelContainer::new(ctx, map_rect);
            if let Some(request) = self.map.initialize(&container, center, zoom) {
                spawn_engine(ctx, request);
            }
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.map.teardown();
    }
}
