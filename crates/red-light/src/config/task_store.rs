//! Persisted task declaration.
//!
//! A JSON object at `~/.config/red-light-green-light/config.json` whose only
//! recognized key is `current_task`. Other keys are carried through saves
//! untouched. Read failures are logged and read as "no task".

use crate::{
    AppError, AppResult,
    config::{config_dir, write_atomic},
};

use std::{
    fs,
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

const CONFIG_FILE: &str = "config.json";
const TASK_KEY: &str = "current_task";

/// JSON-file store for the user's declared task.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    /// Store at the default config location.
    #[track_caller]
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            path: config_dir()?.join(CONFIG_FILE),
        })
    }

    /// Store at an explicit path.
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved task, or an empty string if absent or unreadable.
    #[instrument(skip(self))]
    pub fn load(&self) -> String {
        if !self.path.exists() {
            debug!(config_path = ?self.path, "No task config yet");
            return String::new();
        }

        match self.read_object() {
            Ok(object) => object
                .get(TASK_KEY)
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Error loading task");
                String::new()
            }
        }
    }

    /// Set `current_task`, keeping any other keys already in the file.
    #[track_caller]
    #[instrument(skip(self, task))]
    pub fn save(&self, task: &str) -> AppResult<()> {
        let mut object = if self.path.exists() {
            self.read_object().unwrap_or_else(|e| {
                warn!(error = %e, "Existing task config unreadable, replacing it");
                Map::new()
            })
        } else {
            Map::new()
        };

        object.insert(TASK_KEY.to_string(), Value::String(task.to_string()));

        let contents =
            serde_json::to_string(&Value::Object(object)).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to serialize task config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        write_atomic(&self.path, &contents)?;

        info!(config_path = ?self.path, task_len = task.len(), "Task saved");

        Ok(())
    }

    #[track_caller]
    fn read_object(&self) -> AppResult<Map<String, Value>> {
        let contents = fs::read_to_string(&self.path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read task config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        match serde_json::from_str(&contents) {
            Ok(Value::Object(object)) => Ok(object),
            Ok(other) => Err(AppError::ConfigError {
                reason: format!("Task config is not a JSON object: {}", other),
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(e) => Err(AppError::ConfigError {
                reason: format!("Failed to parse task config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
