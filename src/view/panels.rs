// Panel rendering for FileSpy: toolbar, status bar, entry table, detail panel

use crate::app::FileSpy;
use crate::message::Message;
use crate::style;
use eframe::egui;

impl FileSpy {
    pub(crate) fn render_toolbar(&self, ui: &mut egui::Ui, messages: &mut Vec<Message>) {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui.button("📂 Choose Folder…").clicked() {
                messages.push(Message::ChooseFolder);
            }
            if ui
                .add_enabled(self.navigator.can_navigate_up(), egui::Button::new("⬆ Up"))
                .on_hover_text("Enclosing folder (Backspace)")
                .clicked()
            {
                messages.push(Message::NavigateUp);
            }

            let mut show_hidden = self.navigator.show_hidden();
            if ui.checkbox(&mut show_hidden, "Hidden").changed() {
                messages.push(Message::SetShowHidden(show_hidden));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let has_selection = self.navigator.selected_entry().is_some();
                if ui
                    .add_enabled(has_selection, egui::Button::new("💾 Export…"))
                    .clicked()
                {
                    messages.push(Message::Export);
                }
                if ui
                    .add_enabled(has_selection, egui::Button::new("Open"))
                    .on_hover_text("Open with the default application")
                    .clicked()
                {
                    messages.push(Message::OpenInSystem);
                }
            });
        });
        ui.add_space(4.0);
    }

    pub(crate) fn render_status(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            match self.navigator.current_folder() {
                Some(_) => ui.label(format!("{} items", self.navigator.entries().len())),
                None => ui.label("No folder selected"),
            };
            if self.navigator.folder_unreadable() {
                ui.colored_label(ui.visuals().warn_fg_color, " | Folder cannot be read");
            }
        });
    }

    pub(crate) fn render_table(&mut self, ui: &mut egui::Ui, messages: &mut Vec<Message>) {
        use egui_extras::{Column, TableBuilder};

        let entries = self.navigator.entries();
        let selected = self.navigator.selected_index();

        let mut table = TableBuilder::new(ui)
            .striped(true)
            .resizable(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(style::ICON_COL_WIDTH))
            .column(Column::remainder().clip(true));

        if self.scroll_to_top && !entries.is_empty() {
            table = table.scroll_to_row(0, Some(egui::Align::TOP));
        }
        self.scroll_to_top = false;

        table
            .header(style::HEADER_HEIGHT, |mut header| {
                header.col(|ui| {
                    ui.label("");
                });
                header.col(|ui| {
                    ui.label("Name");
                });
            })
            .body(|body| {
                body.rows(style::ROW_HEIGHT, entries.len(), |mut row| {
                    let row_index = row.index();
                    let entry = &entries[row_index];
                    let is_selected = selected == Some(row_index);
                    row.set_selected(is_selected);

                    row.col(|ui| {
                        ui.label(egui::RichText::new(entry.get_icon()).size(style::ICON_SIZE));
                    });

                    row.col(|ui| {
                        let mut text = egui::RichText::new(entry.display_name());
                        if entry.is_dir {
                            text = text.color(style::DIRECTORY_COLOR);
                        }
                        let response =
                            style::truncated_label_with_sense(ui, text, egui::Sense::click());

                        // Single click selects, double click enters directories
                        if response.clicked() {
                            messages.push(Message::Select(Some(row_index)));
                        }
                        if response.double_clicked() {
                            messages.push(Message::NavigateInto(row_index));
                        }
                    });
                });
            });

        self.post_render.mark_rendered();
    }

    pub(crate) fn render_detail(&self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        ui.vertical_centered(|ui| {
            ui.heading("Attributes");
        });
        ui.separator();

        match &self.detail {
            Some(report) => {
                egui::ScrollArea::both()
                    .id_salt("detail_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let mut text = report.as_str();
                        ui.add(
                            egui::TextEdit::multiline(&mut text)
                                .code_editor()
                                .desired_width(f32::INFINITY),
                        );
                    });
            }
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label("No selection");
                });
            }
        }
    }
}
