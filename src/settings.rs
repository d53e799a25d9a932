// Process-wide preferences: a flat key/value store of strings.

use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

/// Key/value store handed to components that persist small values.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// Preferences backed by a TOML table on disk, written through on every change.
pub struct PreferencesFile {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl PreferencesFile {
    /// Default location under the application's config directory.
    pub fn default_path() -> Option<PathBuf> {
        crate::config::project_dirs().map(|dirs| dirs.config_dir().join("preferences.toml"))
    }

    /// Open the store at `path`. A missing or corrupt file starts out empty.
    pub fn open(path: PathBuf) -> Self {
        let values = match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<BTreeMap<String, String>>(&contents) {
                Ok(values) => values,
                Err(e) => {
                    warn!("Ignoring corrupt preferences {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) => {
                debug!("No preferences at {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    fn flush(&self) {
        if let Err(e) = self.write() {
            warn!("Failed to write preferences {}: {}", self.path.display(), e);
        }
    }

    fn write(&self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string(&self.values)?)?;
        Ok(())
    }
}

impl SettingsStore for PreferencesFile {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
        self.flush();
    }

    fn remove(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.flush();
        }
    }
}

/// In-memory store, used when no config directory exists and in tests.
#[derive(Default)]
pub struct MemorySettings {
    values: HashMap<String, String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferences_persist_across_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.toml");

        let mut prefs = PreferencesFile::open(path.clone());
        assert_eq!(prefs.get("slot"), None);
        prefs.set("slot", "first".to_string());
        prefs.set("slot", "second".to_string());

        let reopened = PreferencesFile::open(path);
        assert_eq!(reopened.get("slot").as_deref(), Some("second"));
    }

    #[test]
    fn test_preferences_remove() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");

        let mut prefs = PreferencesFile::open(path.clone());
        prefs.set("slot", "value".to_string());
        prefs.remove("slot");

        assert_eq!(PreferencesFile::open(path).get("slot"), None);
    }

    #[test]
    fn test_corrupt_preferences_start_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "this is = = not toml").unwrap();

        let prefs = PreferencesFile::open(path);
        assert_eq!(prefs.get("anything"), None);
    }

    #[test]
    fn test_memory_settings() {
        let mut settings = MemorySettings::new();
        settings.set("k", "v".to_string());
        assert_eq!(settings.get("k").as_deref(), Some("v"));
        settings.remove("k");
        assert_eq!(settings.get("k"), None);
    }
}
