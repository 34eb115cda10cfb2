use crate::config::{default_check_interval_secs, default_quit_grace_ms};

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Monitoring loop timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorSettings {
    /// Seconds to sleep between monitoring cycles.
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,

    /// Milliseconds Quit waits for the loop to notice it was stopped.
    #[serde(default = "default_quit_grace_ms")]
    pub quit_grace_ms: u64,
}

impl MonitorSettings {
    /// Sleep between cycles, never shorter than one second.
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs.max(1))
    }

    /// Grace period granted on Quit.
    pub fn quit_grace(&self) -> Duration {
        Duration::from_millis(self.quit_grace_ms)
    }
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            check_interval_secs: default_check_interval_secs(),
            quit_grace_ms: default_quit_grace_ms(),
        }
    }
}
