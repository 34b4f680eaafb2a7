//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the sleep-config.toml file.
//! It tells the calculator where to keep user preferences and which theme and language
//! to use before the user has picked any.

use crate::preferences::{FileStore, Language, Preferences, Theme};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "sleep-config.toml";

/// Application configuration loaded from sleep-config.toml
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Preference store location
    pub storage: StorageConfig,
    /// Fallbacks used when nothing is stored yet
    pub defaults: DefaultsConfig,
}

/// Where user preference flags are persisted
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Path of the TOML key/value file holding theme and language
    pub path: PathBuf,
}

/// Initial preference values
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DefaultsConfig {
    /// Language shown until the user switches
    pub language: Language,
    /// Theme shown until the user switches
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage: StorageConfig {
                path: PathBuf::from("sleep-prefs.toml"),
            },
            defaults: DefaultsConfig {
                language: Language::It,
                theme: Theme::Light,
            },
        }
    }
}

impl Config {
    /// Load configuration from sleep-config.toml file
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    log::debug!(
                        "loaded configuration from {}",
                        path.as_ref().display()
                    );
                    config
                }
                Err(e) => {
                    log::warn!("invalid config file format: {}", e);
                    log::warn!("using default configuration");
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config file found, using default configuration");
                Self::default()
            }
            Err(e) => {
                log::warn!(
                    "cannot read config file {}: {}",
                    path.as_ref().display(),
                    e
                );
                log::warn!("using default configuration");
                Self::default()
            }
        }
    }

    /// Save configuration to the given path
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        log::debug!("configuration saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Open the configured preference store and read the stored flags.
    ///
    /// A relative store path is resolved against `base`, normally the
    /// directory holding the configuration file.
    pub fn open_preferences(&self, base: &Path) -> Preferences<FileStore> {
        let path = if self.storage.path.is_absolute() {
            self.storage.path.clone()
        } else {
            base.join(&self.storage.path)
        };
        Preferences::load_with_defaults(
            FileStore::open(path),
            self.defaults.theme,
            self.defaults.language,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage.path, PathBuf::from("sleep-prefs.toml"));
        assert_eq!(config.defaults.language, Language::It);
        assert_eq!(config.defaults.theme, Theme::Light);
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sleep-config.toml");

        let mut config = Config::default();
        config.defaults.language = Language::En;
        config.save_to_path(&path).unwrap();

        let parsed = Config::load_from_path(&path);
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_parses_handwritten_file() {
        let parsed: Config = toml::from_str(
            r#"
[storage]
path = "/var/lib/sleep/prefs.toml"

[defaults]
language = "en"
theme = "dark"
"#,
        )
        .unwrap();
        assert_eq!(parsed.defaults.theme, Theme::Dark);
        assert_eq!(parsed.storage.path, PathBuf::from("/var/lib/sleep/prefs.toml"));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sleep-config.toml");
        fs::write(&path, "[defaults]\nlanguage = \"de\"\n").unwrap();
        assert_eq!(Config::load_from_path(&path), Config::default());
    }

    #[test]
    fn test_unreadable_path_falls_back() {
        // a directory exists but cannot be read as a file
        let dir = tempdir().unwrap();
        assert_eq!(Config::load_from_path(dir.path()), Config::default());
    }

    #[test]
    fn test_preferences_use_configured_defaults() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.defaults.theme = Theme::Dark;
        config.defaults.language = Language::En;

        let prefs = config.open_preferences(dir.path());
        assert_eq!(prefs.theme(), Theme::Dark);
        assert_eq!(prefs.language(), Language::En);
        assert_eq!(prefs.store().path(), dir.path().join("sleep-prefs.toml"));
    }
}
