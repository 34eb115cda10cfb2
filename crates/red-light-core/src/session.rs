use uuid::Uuid;

/// Shared session state for the menu-bar controller and the monitoring loop.
///
/// The supervisor is the only writer. The loop takes a clone of this value at
/// the top of every cycle and never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Whether monitoring is switched on.
    pub enabled: bool,
    /// Identifies the monitoring run started most recently.
    pub run_id: Uuid,
    /// The task the user declared they are working on.
    pub current_task: String,
    /// API key for the analysis endpoint, if one is known.
    pub api_key: Option<String>,
}

impl Session {
    /// Create a disabled session from persisted task and credential.
    pub fn new(current_task: String, api_key: Option<String>) -> Self {
        Self {
            enabled: false,
            run_id: Uuid::nil(),
            current_task,
            api_key,
        }
    }

    /// True while monitoring is enabled for the given run.
    pub fn is_active(&self, run_id: Uuid) -> bool {
        self.enabled && self.run_id == run_id
    }

    /// True when a non-empty API key is present.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}
