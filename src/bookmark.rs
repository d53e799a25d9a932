// Durable reference to the working directory, kept in a single
// preferences slot and refreshed when it goes stale.

use crate::entry::{path_from_bytes, path_to_bytes};
use crate::error::{FileSpyError, Result};
use crate::settings::SettingsStore;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Preferences key of the single working directory slot.
pub const BOOKMARK_KEY: &str = "WorkingDirectoryBookmark";

const TOKEN_VERSION: u32 = 2;

/// Opaque, persistable reference to a folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookmarkToken(String);

impl BookmarkToken {
    #[cfg(test)]
    pub fn from_string(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Serialize, Deserialize)]
struct BookmarkData {
    version: u32,
    /// Raw path bytes; names need not be UTF-8.
    path: Vec<u8>,
    /// `device:inode` of the folder when the token was made.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    identity: Option<String>,
}

#[cfg(unix)]
fn identity_of(path: &Path) -> Option<String> {
    use std::os::unix::fs::MetadataExt;
    fs::metadata(path)
        .ok()
        .map(|m| format!("{}:{}", m.dev(), m.ino()))
}

#[cfg(not(unix))]
fn identity_of(_path: &Path) -> Option<String> {
    None
}

/// Looks for a sibling directory carrying `identity`, i.e. the same folder
/// after a rename.
fn find_moved(former: &Path, identity: &str) -> Option<PathBuf> {
    let parent = former.parent()?;
    fs::read_dir(parent)
        .ok()?
        .flatten()
        .map(|entry| entry.path())
        .find(|candidate| {
            candidate.is_dir() && identity_of(candidate).as_deref() == Some(identity)
        })
}

pub struct BookmarkStore {
    settings: Box<dyn SettingsStore>,
}

impl BookmarkStore {
    pub fn new(settings: Box<dyn SettingsStore>) -> Self {
        Self { settings }
    }

    /// Captures `path` and stores it in the slot, replacing any earlier token.
    pub fn create(&mut self, path: &Path) -> Result<BookmarkToken> {
        let data = BookmarkData {
            version: TOKEN_VERSION,
            path: path_to_bytes(path),
            identity: identity_of(path),
        };
        let raw = toml::to_string(&data)
            .map_err(|e| FileSpyError::BookmarkUnresolvable(e.to_string()))?;
        self.settings.set(BOOKMARK_KEY, raw.clone());
        debug!("Bookmarked {}", path.display());
        Ok(BookmarkToken(raw))
    }

    /// Token currently held in the slot, if any.
    pub fn stored(&self) -> Option<BookmarkToken> {
        self.settings.get(BOOKMARK_KEY).map(BookmarkToken)
    }

    pub fn forget(&mut self) {
        self.settings.remove(BOOKMARK_KEY);
    }

    /// Turns `token` back into a folder path. A stale token is replaced in
    /// the slot with a fresh one for the path it resolved to.
    pub fn resolve(&mut self, token: &BookmarkToken) -> Result<PathBuf> {
        let data: BookmarkData = toml::from_str(token.as_str())
            .map_err(|e| FileSpyError::BookmarkUnresolvable(e.to_string()))?;
        if data.version != TOKEN_VERSION {
            return Err(FileSpyError::BookmarkUnresolvable(format!(
                "unknown token version {}",
                data.version
            )));
        }

        let recorded = path_from_bytes(&data.path);
        let (path, stale) = if recorded.is_dir() {
            let stale = match (&data.identity, identity_of(&recorded)) {
                (Some(expected), Some(actual)) => *expected != actual,
                _ => false,
            };
            (recorded, stale)
        } else {
            let moved = data
                .identity
                .as_deref()
                .and_then(|identity| find_moved(&recorded, identity))
                .ok_or_else(|| {
                    FileSpyError::BookmarkUnresolvable(format!(
                        "{} no longer exists",
                        recorded.display()
                    ))
                })?;
            (moved, true)
        };

        if stale {
            info!("Refreshing stale bookmark for {}", path.display());
            self.create(&path)?;
        }
        Ok(path)
    }
}
