// Navigation state: the current folder, its entries and the selected row.
//
// Every mutation finishes updating state before it queues a notification,
// so observers never see entries and selection out of step.

use crate::bookmark::BookmarkStore;
use crate::deferred::PostRenderQueue;
use crate::entry::FileEntry;
use crate::error::Result;
use crate::io::{self, ScopedAccess};
use crate::session::{SessionRecord, SessionStore};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "FileSpy";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavEvent {
    /// Title, up button, table contents and scroll position follow the folder.
    FolderChanged(Option<PathBuf>),
    /// Same folder, recomputed entries (dotfile visibility toggled).
    EntriesChanged,
    /// Detail panel and export button follow the selection.
    SelectionChanged(Option<PathBuf>),
}

pub struct Navigator {
    access: Box<dyn ScopedAccess>,
    bookmarks: BookmarkStore,
    session: SessionStore,
    dirs_first: bool,

    current_folder: Option<PathBuf>,
    entries: Vec<FileEntry>,
    selected: Option<usize>,
    show_hidden: bool,
    folder_unreadable: bool,

    events: Vec<NavEvent>,
}

impl Navigator {
    pub fn new(
        bookmarks: BookmarkStore,
        session: SessionStore,
        access: Box<dyn ScopedAccess>,
    ) -> Self {
        Self {
            access,
            bookmarks,
            session,
            dirs_first: false,
            current_folder: None,
            entries: Vec::new(),
            selected: None,
            show_hidden: false,
            folder_unreadable: false,
            events: Vec::new(),
        }
    }

    pub fn with_show_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }

    pub fn with_dirs_first(mut self, dirs_first: bool) -> Self {
        self.dirs_first = dirs_first;
        self
    }

    // --- Observable state ---

    pub fn current_folder(&self) -> Option<&Path> {
        self.current_folder.as_deref()
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.selected.and_then(|idx| self.entries.get(idx))
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    /// True when the current folder exists but could not be listed.
    pub fn folder_unreadable(&self) -> bool {
        self.folder_unreadable
    }

    pub fn can_navigate_up(&self) -> bool {
        self.current_folder
            .as_deref()
            .and_then(Path::parent)
            .is_some()
    }

    pub fn window_title(&self) -> String {
        match &self.current_folder {
            Some(folder) => format!("{} - {}", APP_NAME, folder.display()),
            None => APP_NAME.to_string(),
        }
    }

    /// Notifications queued since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<NavEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Folder dimension ---

    /// Makes `folder` current, or clears it. Anything that is not a
    /// directory is ignored. Returns whether the folder was applied.
    pub fn set_folder(&mut self, folder: Option<PathBuf>) -> bool {
        if let Some(path) = &folder {
            if !path.is_dir() {
                debug!("Ignoring non-directory {}", path.display());
                return false;
            }
        }

        let had_selection = self.selected.take().is_some();
        self.current_folder = folder;
        self.reload_entries();

        self.events
            .push(NavEvent::FolderChanged(self.current_folder.clone()));
        if had_selection {
            self.events.push(NavEvent::SelectionChanged(None));
        }
        true
    }

    /// `set_folder`, then reselects `selection` once the new rows are drawn.
    pub fn set_folder_restoring(
        &mut self,
        folder: Option<PathBuf>,
        selection: PathBuf,
        queue: &mut PostRenderQueue,
    ) -> bool {
        if !self.set_folder(folder) {
            return false;
        }
        queue_selection(selection, queue);
        true
    }

    /// A folder the user picked explicitly; it becomes the bookmarked
    /// working directory.
    pub fn choose_folder(&mut self, folder: PathBuf) -> bool {
        if !folder.is_dir() {
            return false;
        }
        if let Err(e) = self.bookmarks.create(&folder) {
            warn!("Could not bookmark {}: {}", folder.display(), e);
        }
        info!("Working directory is now {}", folder.display());
        self.set_folder(Some(folder))
    }

    pub fn set_show_hidden(&mut self, show_hidden: bool) {
        if self.show_hidden == show_hidden {
            return;
        }
        self.show_hidden = show_hidden;
        if self.current_folder.is_none() {
            return;
        }

        let had_selection = self.selected.take().is_some();
        self.reload_entries();

        self.events.push(NavEvent::EntriesChanged);
        if had_selection {
            self.events.push(NavEvent::SelectionChanged(None));
        }
    }

    /// Enters `entry` if it is a directory; anything else is a no-op.
    pub fn navigate_into(&mut self, entry: &FileEntry) -> bool {
        if !entry.is_dir {
            return false;
        }
        self.set_folder(Some(entry.path.clone()))
    }

    /// Moves to the parent folder. At the filesystem root, or without a
    /// folder, nothing happens.
    pub fn navigate_up(&mut self) -> bool {
        let parent = match self.current_folder.as_deref().and_then(Path::parent) {
            Some(parent) => parent.to_path_buf(),
            None => return false,
        };
        self.set_folder(Some(parent))
    }

    /// `navigate_up`, keeping the folder we came from selected in the parent.
    pub fn navigate_up_restoring(&mut self, queue: &mut PostRenderQueue) -> bool {
        let child = match &self.current_folder {
            Some(folder) => folder.clone(),
            None => return false,
        };
        if !self.navigate_up() {
            return false;
        }
        queue_selection(child, queue);
        true
    }

    fn reload_entries(&mut self) {
        self.folder_unreadable = false;
        self.entries = match &self.current_folder {
            Some(folder) => {
                match io::list_directory(folder, self.show_hidden, self.access.as_ref()) {
                    Ok(mut entries) => {
                        io::sort_entries(&mut entries, self.dirs_first);
                        entries
                    }
                    Err(e) => {
                        warn!("{}", e);
                        self.folder_unreadable = true;
                        Vec::new()
                    }
                }
            }
            None => Vec::new(),
        };
    }

    // --- Selection dimension ---

    /// Selects row `index`, or clears the selection. Indices outside the
    /// current entries are rejected.
    pub fn set_selection(&mut self, index: Option<usize>) -> bool {
        if let Some(idx) = index {
            if idx >= self.entries.len() {
                return false;
            }
        }
        if self.selected == index {
            return true;
        }
        self.selected = index;
        self.events.push(NavEvent::SelectionChanged(
            self.selected_entry().map(|e| e.path.clone()),
        ));
        true
    }

    pub fn select_path(&mut self, path: &Path) -> bool {
        match self.entries.iter().position(|e| e.path == path) {
            Some(idx) => self.set_selection(Some(idx)),
            None => false,
        }
    }

    pub fn describe_selection(&self) -> Option<String> {
        self.selected_entry().map(io::describe)
    }

    /// Writes the selected entry's report to `dest`. Without a selection
    /// there is nothing to export.
    pub fn export_selection(&self, dest: &Path) -> Result<()> {
        match self.selected_entry() {
            Some(entry) => {
                io::write_report(dest, &io::describe(entry))?;
                info!("Exported {} to {}", entry.path.display(), dest.display());
                Ok(())
            }
            None => Ok(()),
        }
    }

    // --- Session ---

    /// Startup: reopen the last folder and queue its selection. Missing or
    /// broken state silently means "no prior folder".
    pub fn restore(&mut self, queue: &mut PostRenderQueue) {
        let bookmarked = self.bookmarks.stored().and_then(|token| {
            match self.bookmarks.resolve(&token) {
                Ok(path) => Some(path),
                Err(e) => {
                    debug!("{}", e);
                    self.bookmarks.forget();
                    None
                }
            }
        });

        let record = match self.session.load() {
            Ok(record) => record,
            Err(e) => {
                debug!("{}", e);
                SessionRecord::default()
            }
        };

        let folder = record
            .folder_path()
            .filter(|path| path.is_dir())
            .or(bookmarked);

        match (folder, record.selection_path()) {
            (Some(folder), Some(selection)) => {
                self.set_folder_restoring(Some(folder), selection, queue);
            }
            (folder, _) => {
                self.set_folder(folder);
            }
        }
    }

    /// Teardown: overwrite the session record with the current state.
    pub fn save_session(&self) {
        self.session
            .save(self.current_folder.as_deref(), self.selected_entry());
    }
}

/// Selects `selection` once the rows holding it have been drawn.
fn queue_selection(selection: PathBuf, queue: &mut PostRenderQueue) {
    queue.push(Box::new(move |navigator: &mut Navigator| {
        if !navigator.select_path(&selection) {
            debug!("Selection {} is no longer listed", selection.display());
        }
    }));
}
