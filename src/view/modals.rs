// Modal windows. Export failures are the only errors shown to the user.

use crate::app::FileSpy;
use crate::message::Message;
use crate::style;
use eframe::egui;

impl FileSpy {
    pub(crate) fn render_error_modal(&self, ctx: &egui::Context, messages: &mut Vec<Message>) {
        if let Some(error) = &self.export_error {
            egui::Window::new("Export Failed")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .default_width(style::modal_width(ctx))
                .show(ctx, |ui| {
                    ui.label(error);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        messages.push(Message::DismissError);
                    }
                });
        }
    }
}
