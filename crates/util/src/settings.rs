//! Display settings persistence for tickmenu hosts.
//!
//! A tiny JSON-backed store recording how the menu is drawn: text size,
//! breadcrumb separator and tick interval. The file lives in the standard
//! configuration directory (`~/.config/tickmenu/settings.json` on most
//! platforms) unless `TICKMENU_SETTINGS_PATH` points elsewhere.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::{config_dir, home_dir};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable allowing callers to override the settings file path.
pub const SETTINGS_PATH_ENV: &str = "TICKMENU_SETTINGS_PATH";

/// Default filename for the JSON payload.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Error surfaced when reading or writing settings fails.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O failure (for example, permissions or missing directory).
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization failure while saving.
    #[error("settings serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persisted display values. Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Advisory text width in columns.
    pub width: u16,
    /// Total text height in rows, breadcrumb included.
    pub height: u16,
    /// Separator placed between breadcrumb labels.
    pub separator: String,
    /// Interval between host loop ticks, in milliseconds.
    pub tick_ms: u64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: 40,
            height: 7,
            separator: " » ".to_string(),
            tick_ms: 50,
        }
    }
}

/// Settings store backed by a JSON file.
#[derive(Debug, Default)]
pub struct SettingsStore {
    path: PathBuf,
    settings: DisplaySettings,
    persist_to_disk: bool,
}

impl SettingsStore {
    /// Loads settings from `path`, or from the default location when `None`.
    pub fn open(path: Option<PathBuf>) -> Result<Self, SettingsError> {
        let resolved_path = path.unwrap_or_else(default_settings_path);
        let settings = load_settings(&resolved_path)?;
        debug!(path = %resolved_path.display(), "Loaded display settings");
        Ok(Self {
            path: resolved_path,
            settings,
            persist_to_disk: true,
        })
    }

    /// In-memory store used when the config directory cannot be accessed.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            settings: DisplaySettings::default(),
            persist_to_disk: false,
        }
    }

    /// Path to the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    /// Replaces the settings and writes them out unless the store is ephemeral.
    pub fn update(&mut self, settings: DisplaySettings) -> Result<(), SettingsError> {
        self.settings = settings;
        if self.persist_to_disk {
            self.save()?;
        }
        Ok(())
    }

    fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

/// Expands a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    let home = || home_dir().unwrap_or_else(|| PathBuf::from("~"));
    if trimmed == "~" {
        return home();
    }
    match trimmed.strip_prefix("~/").or_else(|| trimmed.strip_prefix("~\\")) {
        Some(rest) => home().join(rest),
        None => PathBuf::from(trimmed),
    }
}

fn default_settings_path() -> PathBuf {
    if let Ok(path) = env::var(SETTINGS_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tickmenu")
        .join(SETTINGS_FILE_NAME)
}

fn load_settings(path: &Path) -> Result<DisplaySettings, SettingsError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(settings) => Ok(settings),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse settings file; using defaults"
                );
                Ok(DisplaySettings::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(DisplaySettings::default()),
        Err(error) => Err(SettingsError::Io(error)),
    }
}
