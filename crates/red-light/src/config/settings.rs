//! Tuning settings for red-light-green-light.
//!
//! Loaded from `settings.toml` next to the task config. A missing file is
//! created with defaults; missing fields take their defaults.

use crate::{
    AppError, AppResult,
    config::{AnalyzerSettings, CaptureSettings, MonitorSettings, config_dir, write_atomic},
};

use std::{fs, panic::Location, path::Path};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

const SETTINGS_FILE: &str = "settings.toml";

/// Main settings struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Monitoring loop timing.
    #[serde(default)]
    pub monitor: MonitorSettings,
    /// Screen capture sizing.
    #[serde(default)]
    pub capture: CaptureSettings,
    /// Remote model settings.
    #[serde(default)]
    pub analyzer: AnalyzerSettings,
}

impl Settings {
    /// Load settings from the config directory, creating defaults if absent.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let path = config_dir()?.join(SETTINGS_FILE);
        Self::load_from(&path)
    }

    /// Load settings from `path`, writing defaults there if it does not exist.
    #[track_caller]
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            info!(settings_path = ?path, "No settings found, creating default");
            let settings = Settings::default();
            settings.save_to(path)?;
            return Ok(settings);
        }

        let contents = fs::read_to_string(path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read settings: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse settings: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(settings_path = ?path, "Settings loaded");

        Ok(settings)
    }

    /// Save settings to `path` using atomic write.
    #[track_caller]
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize settings: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        write_atomic(path, &contents)?;

        info!(settings_path = ?path, "Settings saved (atomic write)");

        Ok(())
    }
}
