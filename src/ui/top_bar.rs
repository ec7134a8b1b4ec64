//! Top bar UI: app title, status, and assistant panel toggle.

use super::colors;
use crate::state::AppState;
use eframe::egui::{self, Color32, RichText};
use egui_phosphor::regular as icons;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_bar")
        .exact_height(40.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(
                    RichText::new(icons::GLOBE)
                        .size(16.0)
                        .color(colors::ui::ACTIVE),
                );

                // App title
                ui.label(
                    RichText::new("GeoView")
                        .strong()
                        .size(16.0)
                        .color(Color32::WHITE),
                );
                ui.label(
                    RichText::new(" BETA ")
                        .size(10.0)
                        .color(colors::ui::LABEL)
                        .background_color(colors::ui::TAG_BG),
                );

                ui.separator();

                // Status text
                ui.label(
                    RichText::new(&state.status_message)
                        .size(13.0)
                        .color(Color32::GRAY),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let (icon, hint) = if state.assistant_open {
                        (icons::SIDEBAR_SIMPLE, "Close assistant panel")
                    } else {
                        (icons::CHAT_CIRCLE, "Open assistant panel")
                    };
                    if ui
                        .button(RichText::new(icon).size(16.0))
                        .on_hover_text(hint)
                        .clicked()
                    {
                        state.assistant_open = !state.assistant_open;
                        state.settings.assistant_open = state.assistant_open;
                        state.settings.save();
                    }

                    ui.label(
                        RichText::new("Aerial Imagery Dashboard")
                            .size(12.0)
                            .color(colors::ui::LABEL),
                    );
                });
            });
        });
}
