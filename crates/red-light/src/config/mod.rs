mod analyzer_settings;
mod capture_settings;
mod credential_store;
mod monitor_settings;
mod settings;
mod task_store;

pub(crate) use {
    analyzer_settings::AnalyzerSettings,
    capture_settings::CaptureSettings,
    credential_store::CredentialStore,
    monitor_settings::MonitorSettings,
    settings::Settings,
    task_store::TaskStore,
};

#[cfg(test)]
pub(crate) use credential_store::resolve_api_key;

use crate::{AppError, AppResult};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::BaseDirs;
use error_location::ErrorLocation;
use tracing::debug;

/// Directory name under `~/.config`.
pub(crate) const APP_NAME: &str = "red-light-green-light";

pub(crate) const DEFAULT_CHECK_INTERVAL_SECS: u64 = 10;
pub(crate) const DEFAULT_QUIT_GRACE_MS: u64 = 500;
pub(crate) const DEFAULT_TARGET_WIDTH: u32 = 1280;
pub(crate) const DEFAULT_JPEG_QUALITY: u8 = 85;

pub(crate) fn default_check_interval_secs() -> u64 {
    DEFAULT_CHECK_INTERVAL_SECS
}

pub(crate) fn default_quit_grace_ms() -> u64 {
    DEFAULT_QUIT_GRACE_MS
}

pub(crate) fn default_target_width() -> u32 {
    DEFAULT_TARGET_WIDTH
}

pub(crate) fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

/// `<home>/.config/red-light-green-light`, created on first use.
#[track_caller]
pub(crate) fn config_dir() -> AppResult<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| AppError::ConfigError {
        reason: "Failed to locate home directory".to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let config_dir = base_dirs.home_dir().join(".config").join(APP_NAME);

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
        debug!(config_dir = ?config_dir, "Created config directory");
    }

    Ok(config_dir)
}

/// Write `contents` to `path` via a temporary sibling and a rename.
#[track_caller]
pub(crate) fn write_atomic(path: &Path, contents: &str) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
        reason: format!("Failed to create temp file {:?}: {}", temp_path, e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    temp_file
        .write_all(contents.as_bytes())
        .map_err(|e| AppError::ConfigError {
            reason: format!("Failed to write temp file {:?}: {}", temp_path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    temp_file.sync_all().map_err(|e| AppError::ConfigError {
        reason: format!("Failed to sync temp file {:?}: {}", temp_path, e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    fs::rename(&temp_path, path).map_err(|e| AppError::ConfigError {
        reason: format!("Failed to rename {:?} to {:?}: {}", temp_path, path, e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    Ok(())
}
