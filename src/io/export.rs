use crate::entry::FileEntry;
use crate::error::{FileSpyError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension given to exported reports, replacing the entry's own.
pub const REPORT_EXTENSION: &str = "fs.txt";

/// `notes.md` exports as `notes.fs.txt`; `Makefile` as `Makefile.fs.txt`.
pub fn default_export_name(entry: &FileEntry) -> String {
    PathBuf::from(&entry.name)
        .with_extension(REPORT_EXTENSION)
        .to_string_lossy()
        .to_string()
}

/// Writes `report` to `dest` as UTF-8, replacing any existing file.
pub fn write_report(dest: &Path, report: &str) -> Result<()> {
    fs::write(dest, report.as_bytes()).map_err(|source| FileSpyError::ExportWriteFailed {
        path: dest.to_path_buf(),
        source,
    })
}
