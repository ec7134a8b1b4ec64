//! The UI region hosting the map.

use eframe::egui::{self, Rect, Vec2};

/// Host-side view of the element the map is mounted in.
pub trait HostContainer {
    /// Whether the container is laid out in the UI tree.
    fn is_attached(&self) -> bool;

    /// Current size of the container, if it is laid out.
    fn size(&self) -> Option<Vec2>;

    fn is_fullscreen(&self) -> bool;

    fn request_fullscreen(&self);

    fn exit_fullscreen(&self);
}

/// The central panel region of the egui viewport.
///
/// Fullscreen applies to the native window or browser canvas as a whole,
/// which is what the map occupies once the other panels are hidden.
pub struct PanelContainer {
    ctx: egui::Context,
    rect: Option<Rect>,
}

impl PanelContainer {
    pub fn new(ctx: &egui::Context, rect: Option<Rect>) -> Self {
        Self {
            ctx: ctx.clone(),
            rect,
        }
    }
}

impl HostContainer for PanelContainer {
    fn is_attached(&self) -> bool {
        self.rect.is_some_and(|r| r.is_positive())
    }

    fn size(&self) -> Option<Vec2> {
        self.rect.map(|r| r.size())
    }

    fn is_fullscreen(&self) -> bool {
        self.ctx
            .input(|i| i.viewport().fullscreen)
            .unwrap_or(false)
    }

    fn request_fullscreen(&self) {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(true));
    }

    fn exit_fullscreen(&self) {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(false));
    }
}
