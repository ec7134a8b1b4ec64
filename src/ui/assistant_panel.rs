//! Right panel UI: assistant placeholder.

use super::colors;
use crate::state::AppState;
use eframe::egui::{self, RichText, ScrollArea};
use egui_phosphor::regular as icons;

pub fn render_assistant_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::SidePanel::right("assistant_panel")
        .resizable(true)
        .default_width(280.0)
        .min_width(220.0)
        .max_width(420.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!("{} Assistant", icons::CHAT_CIRCLE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .small_button(icons::X)
                        .on_hover_text("Close assistant panel")
                        .clicked()
                    {
                        state.assistant_open = false;
                        state.settings.assistant_open = false;
                        state.settings.save();
                    }
                });
            });
            ui.separator();

            ScrollArea::vertical().show(ui, |ui| {
                ui.label(
                    RichText::new("Ask questions about the imagery in view.")
                        .size(12.0)
                        .color(colors::ui::VALUE),
                );
                ui.add_space(8.0);
                ui.label(
                    RichText::new("The assistant is not connected yet.")
                        .italics()
                        .size(11.0)
                        .color(colors::ui::LABEL),
                );
            });
        });
}
