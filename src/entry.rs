use std::fs;
use std::path::{Path, PathBuf};

/// A single row of the listing: a child path tagged as directory or not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
    pub extension: String,
}

impl FileEntry {
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let symlink_meta = fs::symlink_metadata(&path).ok()?;
        let is_symlink = symlink_meta.is_symlink();

        let name = path.file_name()?.to_string_lossy().to_string();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        // Links to directories are navigable, so follow them for the tag.
        let is_dir = fs::metadata(&path)
            .map(|m| m.is_dir())
            .unwrap_or(false);

        Some(Self {
            path,
            name,
            is_dir,
            is_symlink,
            extension,
        })
    }

    pub fn get_icon(&self) -> &str {
        if self.is_dir {
            return "📁";
        }
        match self.extension.as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp" | "svg" | "tiff" | "heic" => "🖼",
            "mp4" | "mkv" | "mov" | "avi" | "webm" => "🎞",
            "mp3" | "wav" | "flac" | "ogg" | "m4a" | "aiff" => "🎵",
            "zip" | "tar" | "gz" | "7z" | "rar" | "xz" | "bz2" | "dmg" => "📦",
            "rs" | "toml" | "py" | "js" | "ts" | "c" | "h" | "cpp" | "swift" | "m" | "go"
            | "java" | "sh" | "json" | "yaml" | "yml" | "xml" | "html" | "css" => "📝",
            "pdf" => "📕",
            "app" | "exe" | "msi" => "🚀",
            _ => "📄",
        }
    }

    pub fn display_name(&self) -> String {
        if self.is_symlink {
            format!("{} \u{2192}", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Names starting with a period are hidden from default listings.
pub fn is_dotfile(name: &str) -> bool {
    name.starts_with('.')
}

/// File name of `path` as shown in titles and reports; the root has none.
pub fn path_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Raw bytes of `path` for persistence, so non-UTF-8 names survive a round trip.
#[cfg(unix)]
pub fn path_to_bytes(path: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(not(unix))]
pub fn path_to_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().into_owned().into_bytes()
}

#[cfg(unix)]
pub fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
pub fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}
