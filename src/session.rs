// Last viewed folder and selection, kept between launches as two lines of text.

use crate::entry::{path_from_bytes, path_to_bytes, FileEntry};
use crate::error::{FileSpyError, ReadFailure, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub const STATE_FILE_NAME: &str = "StoredState.txt";

/// Folder and selection lines; an empty line means "nothing".
///
/// Lines hold the raw path bytes, so the file is text only as long as the
/// paths are.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionRecord {
    pub folder: Option<PathBuf>,
    pub selection: Option<PathBuf>,
}

impl SessionRecord {
    pub fn folder_path(&self) -> Option<PathBuf> {
        self.folder.clone()
    }

    pub fn selection_path(&self) -> Option<PathBuf> {
        self.selection.clone()
    }

    fn parse(contents: &[u8]) -> Self {
        let mut lines = contents.split(|&b| b == b'\n');
        Self {
            folder: lines.next().and_then(line_path),
            selection: lines.next().and_then(line_path),
        }
    }

    fn render(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for line in [&self.folder, &self.selection] {
            if let Some(path) = line {
                out.extend_from_slice(&path_to_bytes(path));
            }
            out.push(b'\n');
        }
        out
    }
}

fn line_path(line: &[u8]) -> Option<PathBuf> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if line.is_empty() {
        None
    } else {
        Some(path_from_bytes(line))
    }
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location under the application's data directory.
    pub fn default_path() -> Option<PathBuf> {
        crate::config::project_dirs().map(|dirs| dirs.data_dir().join(STATE_FILE_NAME))
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the record. Failures are logged and otherwise ignored.
    pub fn save(&self, folder: Option<&Path>, selection: Option<&FileEntry>) {
        let record = SessionRecord {
            folder: folder.map(Path::to_path_buf),
            selection: selection.map(|e| e.path.clone()),
        };
        if let Err(e) = self.write(&record) {
            warn!("Failed to save session to {}: {}", self.path.display(), e);
        } else {
            debug!("Saved session to {}", self.path.display());
        }
    }

    fn write(&self, record: &SessionRecord) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, record.render())
    }

    pub fn load(&self) -> Result<SessionRecord> {
        let contents = fs::read(&self.path).map_err(|e| FileSpyError::SessionRecordMissing {
            path: self.path.clone(),
            kind: ReadFailure::from(&e),
        })?;
        Ok(SessionRecord::parse(&contents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &Path) -> FileEntry {
        FileEntry {
            path: path.to_path_buf(),
            name: crate::entry::path_name(path),
            is_dir: false,
            is_symlink: false,
            extension: String::new(),
        }
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("FileSpy").join(STATE_FILE_NAME));
        let folder = Path::new("/tmp/demo");
        let selected = entry(Path::new("/tmp/demo/a.txt"));

        store.save(Some(folder), Some(&selected));
        let record = store.load().unwrap();
        assert_eq!(record.folder_path(), Some(PathBuf::from("/tmp/demo")));
        assert_eq!(record.selection_path(), Some(PathBuf::from("/tmp/demo/a.txt")));
    }

    #[test]
    fn test_round_trip_absent_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join(STATE_FILE_NAME));

        store.save(Some(Path::new("/tmp/demo")), None);
        let record = store.load().unwrap();
        assert_eq!(record.folder_path(), Some(PathBuf::from("/tmp/demo")));
        assert_eq!(record.selection_path(), None);

        store.save(None, None);
        assert_eq!(store.load().unwrap(), SessionRecord::default());
    }

    #[test]
    fn test_file_format() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join(STATE_FILE_NAME));
        store.save(Some(Path::new("/a")), Some(&entry(Path::new("/a/b"))));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "/a\n/a/b\n");
    }

    #[test]
    fn test_missing_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join(STATE_FILE_NAME));
        assert!(matches!(
            store.load(),
            Err(FileSpyError::SessionRecordMissing {
                kind: ReadFailure::NotFound,
                ..
            })
        ));
    }

    #[test]
    fn test_truncated_record_parses() {
        assert_eq!(
            SessionRecord::parse(b"/only/folder"),
            SessionRecord {
                folder: Some(PathBuf::from("/only/folder")),
                selection: None,
            }
        );
        assert_eq!(SessionRecord::parse(b""), SessionRecord::default());
        assert_eq!(
            SessionRecord::parse(b"/a\r\n\r\n").folder_path(),
            Some(PathBuf::from("/a"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_round_trip_non_utf8_paths() {
        use std::os::unix::ffi::OsStrExt;
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join(STATE_FILE_NAME));
        let folder = Path::new("/tmp").join(std::ffi::OsStr::from_bytes(b"caf\xE9"));
        let selected = entry(&folder.join(std::ffi::OsStr::from_bytes(b"r\xE9sum\xE9.txt")));

        store.save(Some(&folder), Some(&selected));
        assert_eq!(
            fs::read(store.path()).unwrap(),
            b"/tmp/caf\xE9\n/tmp/caf\xE9/r\xE9sum\xE9.txt\n"
        );

        let record = store.load().unwrap();
        assert_eq!(record.folder_path(), Some(folder));
        assert_eq!(record.selection_path(), Some(selected.path));
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();
        let store = SessionStore::new(blocker.join(STATE_FILE_NAME));

        store.save(Some(Path::new("/tmp")), None);
        assert!(store.load().is_err());
    }
}
