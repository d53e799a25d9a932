use crate::bookmark::BookmarkStore;
use crate::config::Config;
use crate::deferred::PostRenderQueue;
use crate::input::step_selection;
use crate::io::{self, Unsandboxed};
use crate::message::Message;
use crate::navigator::{NavEvent, Navigator};
use crate::session::{SessionStore, STATE_FILE_NAME};
use crate::settings::{MemorySettings, PreferencesFile, SettingsStore};
use crate::style::{self, Theme};
use eframe::egui;
use log::{info, warn};

pub struct FileSpy {
    pub navigator: Navigator,
    pub post_render: PostRenderQueue,

    // Follows the selection
    pub detail: Option<String>,
    // Set on folder change, consumed by the next table render
    pub scroll_to_top: bool,
    pub export_error: Option<String>,

    theme: Theme,
    theme_applied: bool,
    session_saved: bool,
}

impl FileSpy {
    pub fn new(config: &Config) -> Self {
        let settings: Box<dyn SettingsStore> = match PreferencesFile::default_path() {
            Some(path) => Box::new(PreferencesFile::open(path)),
            None => {
                warn!("No config directory; preferences will not persist");
                Box::new(MemorySettings::new())
            }
        };
        let session_path = SessionStore::default_path()
            .unwrap_or_else(|| std::env::temp_dir().join("FileSpy").join(STATE_FILE_NAME));

        let navigator = Navigator::new(
            BookmarkStore::new(settings),
            SessionStore::new(session_path),
            Box::new(Unsandboxed),
        )
        .with_show_hidden(config.ui.show_hidden)
        .with_dirs_first(config.ui.dirs_first);

        let mut app = Self::with_navigator(navigator, Theme::from_config(config.is_dark()));
        app.navigator.restore(&mut app.post_render);
        app
    }

    pub fn with_navigator(navigator: Navigator, theme: Theme) -> Self {
        Self {
            navigator,
            post_render: PostRenderQueue::new(),
            detail: None,
            scroll_to_top: true,
            export_error: None,
            theme,
            theme_applied: false,
            session_saved: false,
        }
    }

    /// Second half of a frame, after the table has drawn: restores queued
    /// for the rows just drawn go first, then the input gathered while
    /// drawing.
    pub fn finish_frame(&mut self, messages: Vec<Message>) {
        self.post_render.run(&mut self.navigator);
        for message in messages {
            self.update_message(message);
        }
    }

    /// Writes the session record once, on the first teardown path reached.
    fn save_session_once(&mut self) {
        if !self.session_saved {
            info!("Saving session before exit");
            self.navigator.save_session();
            self.session_saved = true;
        }
    }

    pub fn update_message(&mut self, message: Message) {
        match message {
            Message::ChooseFolder => self.choose_folder(),
            Message::NavigateUp => {
                self.navigator.navigate_up_restoring(&mut self.post_render);
            }
            Message::NavigateInto(index) => {
                if let Some(entry) = self.navigator.entries().get(index).cloned() {
                    self.navigator.navigate_into(&entry);
                }
            }
            Message::Select(index) => {
                self.navigator.set_selection(index);
            }
            Message::SelectDelta(delta) => {
                let next = step_selection(
                    self.navigator.selected_index(),
                    delta,
                    self.navigator.entries().len(),
                );
                if next.is_some() {
                    self.navigator.set_selection(next);
                }
            }
            Message::SetShowHidden(show_hidden) => self.navigator.set_show_hidden(show_hidden),
            Message::Export => self.export(),
            Message::OpenInSystem => self.open_in_system(),
            Message::DismissError => self.export_error = None,
        }
    }

    fn choose_folder(&mut self) {
        let mut dialog = rfd::FileDialog::new().set_title("Choose Folder");
        if let Some(folder) = self.navigator.current_folder() {
            dialog = dialog.set_directory(folder);
        }
        // Cancelling leaves everything as it was
        if let Some(folder) = dialog.pick_folder() {
            self.navigator.choose_folder(folder);
        }
    }

    fn export(&mut self) {
        let entry = match self.navigator.selected_entry() {
            Some(entry) => entry.clone(),
            None => return,
        };
        let mut dialog = rfd::FileDialog::new()
            .set_title("Export Attributes")
            .set_file_name(io::default_export_name(&entry));
        if let Some(folder) = self.navigator.current_folder() {
            dialog = dialog.set_directory(folder);
        }
        if let Some(dest) = dialog.save_file() {
            if let Err(e) = self.navigator.export_selection(&dest) {
                warn!("{}", e);
                self.export_error = Some(e.to_string());
            }
        }
    }

    fn open_in_system(&self) {
        if let Some(entry) = self.navigator.selected_entry() {
            if let Err(e) = open::that(&entry.path) {
                warn!("Could not open {}: {}", entry.path.display(), e);
            }
        }
    }

    /// Brings title, table and detail panel in line with navigator changes.
    fn apply_events(&mut self, ctx: &egui::Context) {
        for event in self.navigator.take_events() {
            match event {
                NavEvent::FolderChanged(_) => {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Title(
                        self.navigator.window_title(),
                    ));
                    self.scroll_to_top = true;
                }
                NavEvent::EntriesChanged => self.scroll_to_top = true,
                NavEvent::SelectionChanged(Some(_)) => {
                    self.detail = self.navigator.describe_selection();
                }
                NavEvent::SelectionChanged(None) => self.detail = None,
            }
        }
    }
}

impl eframe::App for FileSpy {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            self.theme.apply(ctx);
            self.theme_applied = true;
        }
        self.apply_events(ctx);

        let mut messages = Vec::new();
        self.handle_input(ctx, &mut messages);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.render_toolbar(ui, &mut messages);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.render_status(ui);
        });

        egui::SidePanel::right("detail_panel")
            .resizable(true)
            .min_width(style::DETAIL_MIN)
            .default_width(style::DETAIL_DEFAULT)
            .show(ctx, |ui| {
                self.render_detail(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_table(ui, &mut messages);
        });

        self.render_error_modal(ctx, &mut messages);

        // Apply deferred actions
        self.finish_frame(messages);
        self.apply_events(ctx);

        // Rows queued for restoring need one more pass to be drawn
        if !self.post_render.is_empty() {
            ctx.request_repaint();
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            self.save_session_once();
        }
    }
}

impl Drop for FileSpy {
    // eframe drops the app on shutdown, also when no close was requested.
    fn drop(&mut self) {
        self.save_session_once();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::testing::navigator_in;
    use std::fs;

    fn demo_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "hello").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        dir
    }

    fn selected_name(app: &FileSpy) -> Option<String> {
        app.navigator.selected_entry().map(|e| e.name.clone())
    }

    #[test]
    fn test_restore_runs_before_next_input() {
        let demo = demo_dir();
        let state = tempfile::tempdir().unwrap();
        let mut app = FileSpy::with_navigator(navigator_in(state.path()), Theme::Dark);
        app.navigator.set_folder(Some(demo.path().join("sub")));

        // Frame N: the table draws, then "Up" is applied.
        app.post_render.mark_rendered();
        app.finish_frame(vec![Message::NavigateUp]);
        assert_eq!(selected_name(&app), None);

        // Frame N+1: the parent's rows are drawn, then the user clicks a.txt.
        app.post_render.mark_rendered();
        app.finish_frame(vec![Message::Select(Some(0))]);
        assert_eq!(selected_name(&app).as_deref(), Some("a.txt"));
        assert!(app.post_render.is_empty());
    }

    #[test]
    fn test_restore_applies_without_input() {
        let demo = demo_dir();
        let state = tempfile::tempdir().unwrap();
        let mut app = FileSpy::with_navigator(navigator_in(state.path()), Theme::Dark);
        app.navigator.set_folder(Some(demo.path().join("sub")));

        app.post_render.mark_rendered();
        app.finish_frame(vec![Message::NavigateUp]);
        app.post_render.mark_rendered();
        app.finish_frame(Vec::new());
        assert_eq!(selected_name(&app).as_deref(), Some("sub"));
    }

    #[test]
    fn test_drop_saves_session() {
        let demo = demo_dir();
        let state = tempfile::tempdir().unwrap();
        {
            let mut app = FileSpy::with_navigator(navigator_in(state.path()), Theme::Dark);
            app.navigator.set_folder(Some(demo.path().to_path_buf()));
            app.finish_frame(vec![Message::Select(Some(1))]);
        }

        let record = SessionStore::new(state.path().join(STATE_FILE_NAME))
            .load()
            .unwrap();
        assert_eq!(record.folder_path(), Some(demo.path().to_path_buf()));
        assert_eq!(record.selection_path(), Some(demo.path().join("sub")));
    }
}
