use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application configuration
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Config {
    pub theme: ThemeConfig,
    pub window: WindowConfig,
    pub ui: UiConfig,
}

/// Theme configuration
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ThemeConfig {
    /// "dark" or "light"
    pub mode: String,
}

/// Initial window geometry
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

/// UI behavior configuration
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UiConfig {
    /// Show hidden files by default
    pub show_hidden: bool,
    /// List directories before files
    pub dirs_first: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            theme: ThemeConfig {
                mode: "dark".to_string(),
            },
            window: WindowConfig {
                width: 900.0,
                height: 560.0,
            },
            ui: UiConfig {
                show_hidden: false,
                dirs_first: false,
            },
        }
    }
}

/// Project directories shared by config, preferences and session state.
pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "FileSpy")
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from file, or return defaults if file doesn't exist
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                match fs::read_to_string(&path) {
                    Ok(contents) => match toml::from_str::<Config>(&contents) {
                        Ok(config) => return config,
                        Err(e) => {
                            warn!("Failed to parse config file: {}", e);
                            warn!("Using default configuration");
                        }
                    },
                    Err(e) => {
                        warn!("Failed to read config file: {}", e);
                        warn!("Using default configuration");
                    }
                }
            }
        }
        Config::default()
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }

            let contents = toml::to_string_pretty(self)?;
            fs::write(&path, contents)?;
            return Ok(());
        }

        Err("Could not determine config directory".into())
    }

    /// Create a default config file if it doesn't exist
    pub fn create_default() -> Result<(), Box<dyn std::error::Error>> {
        if let Some(path) = Self::config_path() {
            if !path.exists() {
                let config = Config::default();
                config.save()?;
            }
        }
        Ok(())
    }

    pub fn is_dark(&self) -> bool {
        self.theme.mode != "light"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme.mode, "dark");
        assert_eq!(config.window.width, 900.0);
        assert_eq!(config.window.height, 560.0);
        assert!(!config.ui.show_hidden);
        assert!(!config.ui.dirs_first);
        assert!(config.is_dark());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).expect("Failed to serialize");
        let deserialized: Config = toml::from_str(&toml_str).expect("Failed to deserialize");
        assert_eq!(config.theme.mode, deserialized.theme.mode);
        assert_eq!(config.ui.dirs_first, deserialized.ui.dirs_first);
    }

    #[test]
    fn test_light_theme_parse() {
        let text = r#"
[theme]
mode = "light"

[window]
width = 640.0
height = 480.0

[ui]
show_hidden = true
dirs_first = true
"#;
        let config: Config = toml::from_str(text).unwrap();
        assert!(!config.is_dark());
        assert!(config.ui.show_hidden);
        assert_eq!(config.window.width, 640.0);
    }
}
