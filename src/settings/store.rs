use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::settings::errors::SettingsError;

pub const APP_DIR: &str = "calcmenu";
pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_WELCOME: &str = "===============WELCOME===============";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Replaces the default welcome line when set
    pub welcome_message: Option<String>,
    /// Draws a box around the welcome message
    pub framed_welcome: bool,
}

impl Settings {
    pub fn welcome_text(&self) -> &str {
        self.welcome_message.as_deref().unwrap_or(DEFAULT_WELCOME)
    }

    /// The welcome message as printed above the main menu
    pub fn welcome_banner(&self) -> String {
        let text = self.welcome_text();
        if !self.framed_welcome {
            return text.to_string();
        }

        let width = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
        let border = format!("+{}+", "-".repeat(width + 2));
        let mut banner = border.clone();
        for line in text.lines() {
            let padding = width - line.chars().count();
            banner.push_str(&format!("\n| {}{} |", line, " ".repeat(padding)));
        }
        if text.is_empty() {
            banner.push_str(&format!("\n| {} |", " ".repeat(width)));
        }
        banner.push('\n');
        banner.push_str(&border);
        banner
    }
}

/// Reads and writes `Settings` as pretty-printed JSON
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store backed by `settings.json` inside `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SETTINGS_FILE),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the platform has no user configuration directory.
    pub fn default_location() -> Result<Self, SettingsError> {
        let base = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(Self::new(base.join(APP_DIR)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the settings, writing the defaults first when no file exists yet
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or created, or is not valid settings JSON.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        if !self.path.exists() {
            info!("No settings at {}, writing defaults", self.path.display());
            let settings = Settings::default();
            self.save(&settings)?;
            return Ok(settings);
        }

        let raw = fs::read_to_string(&self.path).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        let settings = serde_json::from_str(&raw).map_err(|source| SettingsError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        debug!("Loaded settings from {}: {:?}", self.path.display(), settings);
        Ok(settings)
    }

    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let io_error = |source| SettingsError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let json = serde_json::to_string_pretty(settings).map_err(|source| {
            SettingsError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(io_error)?;

        debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}
