use super::access::{AccessGuard, ScopedAccess};
use crate::entry::{is_dotfile, FileEntry};
use crate::error::{FileSpyError, Result};
use std::fs;
use std::path::Path;

/// Lists the immediate children of `path`, dropping dotfiles unless
/// `show_hidden`. Entries come back ordered by case-insensitive name.
///
/// The scoped grant on `path` is held only while reading and is released
/// on every exit path.
pub fn list_directory(
    path: &Path,
    show_hidden: bool,
    access: &dyn ScopedAccess,
) -> Result<Vec<FileEntry>> {
    let _guard = AccessGuard::acquire(access, path);

    let read_dir = fs::read_dir(path).map_err(|source| FileSpyError::DirectoryUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::new();
    for entry in read_dir.flatten() {
        let child = entry.path();
        if !show_hidden {
            if let Some(name) = child.file_name() {
                if is_dotfile(&name.to_string_lossy()) {
                    continue;
                }
            }
        }
        if let Some(file_entry) = FileEntry::from_path(child) {
            entries.push(file_entry);
        }
    }
    sort_entries(&mut entries, false);
    Ok(entries)
}

pub fn sort_entries(entries: &mut [FileEntry], dirs_first: bool) {
    entries.sort_by(|a, b| {
        if dirs_first && a.is_dir != b.is_dir {
            return b.is_dir.cmp(&a.is_dir);
        }
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::access::testing::CountingAccess;
    use crate::io::access::Unsandboxed;

    fn demo_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "hello").unwrap();
        fs::write(dir.path().join(".hidden"), "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        dir
    }

    fn names(entries: &[FileEntry]) -> Vec<String> {
        entries.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn test_hidden_entries_filtered() {
        let dir = demo_dir();
        let entries = list_directory(dir.path(), false, &Unsandboxed).unwrap();
        assert_eq!(names(&entries), vec!["a.txt", "sub"]);
        assert!(!entries[0].is_dir);
        assert!(entries[1].is_dir);
        assert_eq!(entries[1].path, dir.path().join("sub"));
    }

    #[test]
    fn test_hidden_listing_is_superset() {
        let dir = demo_dir();
        fs::write(dir.path().join(".env"), "").unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let all = list_directory(dir.path(), true, &Unsandboxed).unwrap();
        let visible = list_directory(dir.path(), false, &Unsandboxed).unwrap();

        let expected: Vec<FileEntry> = all
            .iter()
            .filter(|e| !e.name.starts_with('.'))
            .cloned()
            .collect();
        assert_eq!(visible, expected);
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_unreadable_directory_is_error_and_releases() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let access = CountingAccess::default();

        let result = list_directory(&missing, false, &access);
        assert!(matches!(
            result,
            Err(FileSpyError::DirectoryUnreadable { .. })
        ));
        assert_eq!(access.acquired.get(), 1);
        assert_eq!(access.released.get(), 1);
    }

    #[test]
    fn test_successful_listing_releases() {
        let dir = demo_dir();
        let access = CountingAccess::default();
        list_directory(dir.path(), true, &access).unwrap();
        assert_eq!(access.acquired.get(), 1);
        assert_eq!(access.released.get(), 1);
    }

    #[test]
    fn test_sort_dirs_first() {
        let dir = demo_dir();
        fs::write(dir.path().join("Zeta.md"), "").unwrap();
        let mut entries = list_directory(dir.path(), false, &Unsandboxed).unwrap();
        assert_eq!(names(&entries), vec!["a.txt", "sub", "Zeta.md"]);

        sort_entries(&mut entries, true);
        assert_eq!(names(&entries), vec!["sub", "a.txt", "Zeta.md"]);
    }
}
