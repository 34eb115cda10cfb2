//! Desktop notifications.
//!
//! Every user-facing message the app can raise is a [`Notice`] variant, so
//! wording lives in one place and can be checked without a notification
//! server.

use crate::{AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use notify_rust::Notification;
use red_light_core::StartRefusal;
use tracing::{debug, warn};

/// A notification the app can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Start was attempted without an API key.
    ApiKeyMissing,
    /// Start was attempted without a task.
    TaskMissing,
    /// A new API key was stored.
    ApiKeySaved,
    /// The declared task changed.
    TaskSaved {
        /// The new task text.
        task: String,
    },
    /// The latest cycle judged the screen off task.
    OffTask {
        /// The task the user should get back to.
        task: String,
    },
}

impl Notice {
    /// Notice explaining why monitoring did not start.
    pub fn for_refusal(refusal: StartRefusal) -> Self {
        match refusal {
            StartRefusal::MissingApiKey => Notice::ApiKeyMissing,
            StartRefusal::MissingTask => Notice::TaskMissing,
        }
    }

    /// Notification title.
    pub fn title(&self) -> &'static str {
        match self {
            Notice::ApiKeyMissing => "API Key Missing",
            Notice::TaskMissing => "No Task Set",
            Notice::ApiKeySaved => "API Key Updated",
            Notice::TaskSaved { .. } => "Task Updated",
            Notice::OffTask { .. } => "Focus Alert",
        }
    }

    /// Notification subtitle.
    pub fn subtitle(&self) -> &'static str {
        match self {
            Notice::ApiKeyMissing => "Claude API Key not found",
            Notice::TaskMissing => "Please set a task first",
            Notice::ApiKeySaved => "Your Anthropic API key has been saved",
            Notice::TaskSaved { .. } => "Your focus task has been updated",
            Notice::OffTask { .. } => "You appear to be off task",
        }
    }

    /// Notification body.
    pub fn message(&self) -> String {
        match self {
            Notice::ApiKeyMissing => "Please click 'Set API Key' from the menu".to_string(),
            Notice::TaskMissing => "Click 'Set Task' to define what you're working on".to_string(),
            Notice::ApiKeySaved => {
                "The key is stored securely in your system keychain".to_string()
            }
            Notice::TaskSaved { task } => format!("Now monitoring: {}", task),
            Notice::OffTask { task } => format!("Remember your focus: {}", task),
        }
    }
}

/// Destination for user-facing notices.
pub trait NoticeSink {
    /// Deliver `notice`. Never fails; delivery problems are logged.
    fn notify(&self, notice: Notice);
}

/// Fire-and-forget desktop notifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct Notifier;

impl NoticeSink for Notifier {
    /// Show `notice` on a helper thread; failures are logged.
    fn notify(&self, notice: Notice) {
        debug!(title = notice.title(), "Showing notification");

        let spawned = std::thread::Builder::new()
            .name("notification".to_string())
            .spawn(move || {
                if let Err(e) = Self::show(&notice) {
                    warn!(error = %e, title = notice.title(), "Failed to show notification");
                }
            });

        if let Err(e) = spawned {
            warn!(error = %e, "Failed to spawn notification thread");
        }
    }
}

impl Notifier {
    #[track_caller]
    fn show(notice: &Notice) -> AppResult<()> {
        Notification::new()
            .summary(notice.title())
            .subtitle(notice.subtitle())
            .body(&notice.message())
            .show()
            .map(|_| ())
            .map_err(|e| AppError::NotificationFailed {
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
