//! Central map panel: preset strip, map view, controls and overlays.

use super::colors;
use crate::geo::LatLng;
use crate::map::{MapController, MapError, PanelContainer, TileEngine, LOCATION_PRESETS};
use eframe::egui::{self, Color32, Rect, RichText, Sense, Vec2};
use egui_phosphor::regular as icons;
use web_time::Instant;

/// Width of the zoom/fullscreen/layer button column.
const CONTROL_SIZE: f32 = 32.0;

/// Renders the map panel and returns the map area, if one was laid out.
pub fn render_map_panel(
    ctx: &egui::Context,
    map: &mut MapController<TileEngine>,
    now: Instant,
) -> Option<Rect> {
    let mut map_rect = None;

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(colors::map::BACKGROUND))
        .show(ctx, |ui| {
            render_preset_strip(ui, map);

            let available_size = ui.available_size();
            if available_size.x <= 0.0 || available_size.y <= 0.0 {
                return;
            }

            let (response, painter) = ui.allocate_painter(available_size, Sense::click_and_drag());
            let rect = response.rect;
            map_rect = Some(rect);

            map.observe_container(rect.size(), now);

            painter.rect_filled(rect, 0.0, colors::map::BACKGROUND);
            map.paint(&painter, rect);

            if map.phase().is_loading() {
                draw_loading(ui, rect);
            } else {
                handle_map_interaction(&response, map);
                let cursor = response
                    .hover_pos()
                    .and_then(|pos| map.position_at(rect, pos));
                draw_coordinates(ui, &rect, map, cursor);
                draw_attribution(ui, &rect, map);
                draw_controls(ui, ctx, rect, map);
            }
        });

    if map.needs_repaint() {
        ctx.request_repaint();
    } else if let Some(due) = map.resize_due_in(now) {
        ctx.request_repaint_after(due);
    }

    map_rect
}

fn render_preset_strip(ui: &mut egui::Ui, map: &mut MapController<TileEngine>) {
    egui::Frame::NONE
        .inner_margin(egui::Margin::symmetric(8, 6))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(icons::MAP_PIN)
                        .size(14.0)
                        .color(colors::ui::LABEL),
                );
                for preset in LOCATION_PRESETS {
                    let button = ui.add_enabled(
                        map.is_ready(),
                        egui::Button::new(RichText::new(preset.label).size(12.0)),
                    );
                    if button.clicked() {
                        report(map.fly_to(preset));
                    }
                }
            });
        });
}

fn handle_map_interaction(response: &egui::Response, map: &mut MapController<TileEngine>) {
    if response.dragged() {
        let delta = response.drag_delta();
        if delta != Vec2::ZERO {
            report(map.drag_by(delta));
        }
    }
    if response.drag_stopped() {
        report(map.drag_end());
    }

    if response.double_clicked() {
        report(map.zoom_in());
    }
}

fn draw_loading(ui: &mut egui::Ui, rect: Rect) {
    let spinner_rect = Rect::from_center_size(rect.center(), Vec2::new(140.0, 60.0));
    ui.scope_builder(egui::UiBuilder::new().max_rect(spinner_rect), |ui| {
        ui.vertical_centered(|ui| {
            ui.spinner();
            ui.label(
                RichText::new("Loading map...")
                    .size(12.0)
                    .color(colors::ui::LABEL),
            );
        });
    });
}

/// Center coordinates and zoom in the bottom-left corner.
fn draw_coordinates(
    ui: &mut egui::Ui,
    rect: &Rect,
    map: &MapController<TileEngine>,
    cursor: Option<LatLng>,
) {
    let Some(viewport) = map.viewport() else {
        return;
    };

    let overlay_rect = Rect::from_min_size(
        rect.left_bottom() + Vec2::new(10.0, -76.0),
        Vec2::new(200.0, 66.0),
    );

    ui.scope_builder(egui::UiBuilder::new().max_rect(overlay_rect), |ui| {
        overlay_frame().show(ui, |ui| {
            ui.vertical(|ui| {
                ui.label(
                    RichText::new(format!(
                        "{:.4}, {:.4}",
                        viewport.center_lat, viewport.center_lng
                    ))
                    .monospace()
                    .size(12.0)
                    .color(colors::map::OVERLAY_TEXT),
                );
                ui.label(
                    RichText::new(format!("Zoom: {}", viewport.zoom))
                        .monospace()
                        .size(11.0)
                        .color(colors::ui::LABEL),
                );
                if let Some(cursor) = cursor {
                    ui.label(
                        RichText::new(format!("Cursor: {:.4}, {:.4}", cursor.lat, cursor.lng))
                            .monospace()
                            .size(11.0)
                            .color(colors::ui::LABEL),
                    );
                }
            });
        });
    });
}

fn draw_attribution(ui: &mut egui::Ui, rect: &Rect, map: &MapController<TileEngine>) {
    let basemap = map.active_basemap();
    ui.painter().text(
        rect.right_bottom() + Vec2::new(-6.0, -4.0),
        egui::Align2::RIGHT_BOTTOM,
        format!("© {}", basemap.attribution),
        egui::FontId::proportional(10.0),
        colors::ui::VALUE,
    );
}

/// Zoom, fullscreen and basemap controls along the right edge.
fn draw_controls(
    ui: &mut egui::Ui,
    ctx: &egui::Context,
    rect: Rect,
    map: &mut MapController<TileEngine>,
) {
    let column_rect = Rect::from_min_size(
        rect.right_top() + Vec2::new(-(CONTROL_SIZE + 12.0), 10.0),
        Vec2::new(CONTROL_SIZE + 4.0, 4.0 * (CONTROL_SIZE + 8.0)),
    );

    ui.scope_builder(egui::UiBuilder::new().max_rect(column_rect), |ui| {
        ui.vertical(|ui| {
            if control_button(ui, icons::MAGNIFYING_GLASS_PLUS, "Zoom in", false).clicked() {
                report(map.zoom_in());
            }
            if control_button(ui, icons::MAGNIFYING_GLASS_MINUS, "Zoom out", false).clicked() {
                report(map.zoom_out());
            }

            let flags = map.flags();
            let (icon, hint) = if flags.is_fullscreen {
                (icons::CORNERS_IN, "Exit fullscreen")
            } else {
                (icons::CORNERS_OUT, "Fullscreen")
            };
            if control_button(ui, icon, hint, flags.is_fullscreen).clicked() {
                report(map.toggle_fullscreen(&PanelContainer::new(ctx, Some(rect))));
            }

            if control_button(ui, icons::STACK, "Basemap", flags.layer_picker_open).clicked() {
                map.toggle_layer_picker();
            }
        });
    });

    if map.flags().layer_picker_open {
        draw_layer_picker(ui, column_rect, map);
    }
}

fn control_button(ui: &mut egui::Ui, icon: &str, hint: &str, active: bool) -> egui::Response {
    let color = if active {
        colors::ui::ACTIVE
    } else {
        Color32::WHITE
    };
    ui.add_sized(
        [CONTROL_SIZE, CONTROL_SIZE],
        egui::Button::new(RichText::new(icon).size(16.0).color(color))
            .fill(colors::map::OVERLAY_BG),
    )
    .on_hover_text(hint)
}

fn draw_layer_picker(ui: &mut egui::Ui, column_rect: Rect, map: &mut MapController<TileEngine>) {
    let picker_rect = Rect::from_min_size(
        column_rect.left_bottom() + Vec2::new(-150.0, -(CONTROL_SIZE + 8.0)),
        Vec2::new(144.0, 120.0),
    );

    let mut chosen = None;
    ui.scope_builder(egui::UiBuilder::new().max_rect(picker_rect), |ui| {
        overlay_frame().show(ui, |ui| {
            ui.vertical(|ui| {
                ui.label(
                    RichText::new("Basemap")
                        .size(11.0)
                        .color(colors::ui::LABEL),
                );
                for (index, basemap) in map.basemaps().iter().enumerate() {
                    let active = index == map.active_layer();
                    if ui.selectable_label(active, basemap.name).clicked() {
                        chosen = Some(index);
                    }
                }
            });
        });
    });

    if let Some(index) = chosen {
        report(map.switch_layer(index));
    }
}

fn overlay_frame() -> egui::Frame {
    egui::Frame::NONE
        .fill(colors::map::OVERLAY_BG)
        .corner_radius(4.0)
        .inner_margin(egui::Margin::same(6))
}

/// Rejected operations leave the map unchanged; they only get logged.
fn report(result: Result<(), MapError>) {
    if let Err(e) = result {
        log::debug!("Map operation ignored: {}", e);
    }
}
