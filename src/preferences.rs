//! # User Preferences
//!
//! The calculator remembers two flags between runs: the colour theme and the
//! display language. Both are kept in a small key/value store:
//!
//! - [`MemoryStore`]: in-process map, nothing survives the process
//! - [`FileStore`]: flat TOML table on disk, written through on every change
//!
//! [`Preferences`] reads both flags once when it is created and writes each
//! change straight back to its store.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{fmt, fs, io};
use thiserror::Error;

/// Store key holding the theme flag.
pub const THEME_KEY: &str = "theme";
/// Store key holding the language flag.
pub const LANGUAGE_KEY: &str = "language";

/// Errors raised while persisting preferences.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the store file failed
    #[error("preference store IO: {0}")]
    Io(#[from] io::Error),

    /// The store contents could not be encoded as TOML
    #[error("preference store encoding: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Colour theme of the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Display language of the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    It,
    En,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::It => "it",
            Language::En => "en",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::It => Language::En,
            Language::En => Language::It,
        }
    }
}

/// Error for a flag value that names no known theme or language.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown value: {0:?}")]
pub struct UnknownValue(pub String);

impl FromStr for Theme {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

impl FromStr for Language {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "it" => Ok(Language::It),
            "en" => Ok(Language::En),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A simple string key/value store for user preference flags.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Preference store that lives only as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preference store backed by a flat TOML table of strings.
///
/// The file is read once when the store is opened. A missing file reads as an
/// empty store; an unreadable or malformed one is logged and also treated as
/// empty, so a damaged file never blocks the calculator. Every `set` rewrites
/// the whole file. A malformed file is copied to [`FileStore::backup_path`]
/// before the first rewrite replaces it.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
    malformed: bool,
}

impl FileStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let mut malformed = false;
        let values = match fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                warn!("ignoring malformed preference file {}: {}", path.display(), e);
                malformed = true;
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!("cannot read preference file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self {
            path,
            values,
            malformed,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where a malformed file is kept once it has been replaced.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        if self.malformed {
            let backup = self.backup_path();
            fs::copy(&self.path, &backup)?;
            warn!(
                "malformed preference file {} saved as {}",
                self.path.display(),
                backup.display()
            );
            self.malformed = false;
        }
        let contents = toml::to_string(&self.values)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// Theme and language, loaded from a store and written back on change.
#[derive(Debug)]
pub struct Preferences<S: PreferenceStore> {
    store: S,
    theme: Theme,
    language: Language,
}

impl<S: PreferenceStore> Preferences<S> {
    /// Read both flags from `store`, using built-in defaults for missing ones.
    pub fn load(store: S) -> Self {
        Self::load_with_defaults(store, Theme::default(), Language::default())
    }

    /// Read both flags from `store`.
    ///
    /// The theme is dark only when the store says exactly `"dark"`; anything
    /// else falls back to `default_theme`. An absent or unknown language
    /// falls back to `default_language`.
    pub fn load_with_defaults(store: S, default_theme: Theme, default_language: Language) -> Self {
        let theme = match store.get(THEME_KEY).as_deref() {
            Some("dark") => Theme::Dark,
            Some("light") => Theme::Light,
            _ => default_theme,
        };
        let language = store
            .get(LANGUAGE_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or(default_language);

        Self {
            store,
            theme,
            language,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), StoreError> {
        self.store.set(THEME_KEY, theme.as_str())?;
        self.theme = theme;
        Ok(())
    }

    pub fn set_language(&mut self, language: Language) -> Result<(), StoreError> {
        self.store.set(LANGUAGE_KEY, language.as_str())?;
        self.language = language;
        Ok(())
    }

    /// Flip between light and dark, returning the new theme.
    pub fn toggle_theme(&mut self) -> Result<Theme, StoreError> {
        let next = self.theme.toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    /// Flip between Italian and English, returning the new language.
    pub fn toggle_language(&mut self) -> Result<Language, StoreError> {
        let next = self.language.toggled();
        self.set_language(next)?;
        Ok(next)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
