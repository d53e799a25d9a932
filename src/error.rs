//! Error types
//!
//! Every failure the browser can run into. Only `ExportWriteFailed` is ever
//! shown to the user; the rest are logged and absorbed by the navigator.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a path could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFailure {
    NotFound,
    Unreadable,
}

impl From<&io::Error> for ReadFailure {
    fn from(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ReadFailure::NotFound,
            _ => ReadFailure::Unreadable,
        }
    }
}

impl fmt::Display for ReadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadFailure::NotFound => write!(f, "not found"),
            ReadFailure::Unreadable => write!(f, "unreadable"),
        }
    }
}

#[derive(Error, Debug)]
pub enum FileSpyError {
    #[error("Cannot read directory {}: {source}", .path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot read attributes of {} ({kind})", .path.display())]
    AttributesUnreadable { path: PathBuf, kind: ReadFailure },

    #[error("Bookmark cannot be resolved: {0}")]
    BookmarkUnresolvable(String),

    #[error("Session record {} is {kind}", .path.display())]
    SessionRecordMissing { path: PathBuf, kind: ReadFailure },

    #[error("Could not write {}: {source}", .path.display())]
    ExportWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, FileSpyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_failure_from_io_kind() {
        let missing = io::Error::new(io::ErrorKind::NotFound, "gone");
        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "no");
        assert_eq!(ReadFailure::from(&missing), ReadFailure::NotFound);
        assert_eq!(ReadFailure::from(&denied), ReadFailure::Unreadable);
    }

    #[test]
    fn test_export_error_carries_cause() {
        let err = FileSpyError::ExportWriteFailed {
            path: PathBuf::from("/nowhere/report.fs.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        let text = err.to_string();
        assert!(text.contains("/nowhere/report.fs.txt"));
        assert!(text.contains("permission denied"));
    }
}
