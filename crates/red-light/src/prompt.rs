//! Modal text-entry dialogs.
//!
//! On macOS the dialog is AppleScript's `display dialog`, driven through
//! `osascript`. Dialog text is passed as script arguments, never spliced
//! into the script source. Blocks until the user answers.

use crate::{AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, instrument};

/// AppleScript error number for a cancelled dialog.
const USER_CANCELED: &str = "(-128)";

/// What to ask the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    /// Window title.
    pub title: String,
    /// Question shown above the text field.
    pub message: String,
    /// Text prefilled in the field.
    pub default_text: String,
    /// Mask the typed characters.
    pub secure: bool,
}

impl PromptRequest {
    pub(crate) fn script_lines(&self) -> Vec<String> {
        let hidden = if self.secure { " with hidden answer" } else { "" };

        vec![
            "on run argv".to_string(),
            format!(
                "set dialogResult to display dialog (item 1 of argv) \
                 default answer (item 2 of argv) with title (item 3 of argv) \
                 buttons {{\"Cancel\", \"Save\"}} default button \"Save\" \
                 cancel button \"Cancel\"{}",
                hidden
            ),
            "return text returned of dialogResult".to_string(),
            "end run".to_string(),
        ]
    }
}

/// Show the dialog. `Ok(None)` means the user cancelled.
#[cfg(target_os = "macos")]
#[track_caller]
#[instrument(skip(request), fields(title = %request.title))]
pub fn ask(request: &PromptRequest) -> AppResult<Option<String>> {
    use std::process::Command;

    let mut command = Command::new("osascript");
    for line in request.script_lines() {
        command.arg("-e").arg(line);
    }
    command
        .arg(&request.message)
        .arg(&request.default_text)
        .arg(&request.title);

    let output = command.output().map_err(|e| AppError::PromptFailed {
        reason: format!("Failed to run osascript: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let answer = interpret_dialog_output(
        output.status.success(),
        &String::from_utf8_lossy(&output.stdout),
        &String::from_utf8_lossy(&output.stderr),
    )?;

    debug!(answered = answer.is_some(), "Dialog closed");

    Ok(answer)
}

/// Show the dialog. Only macOS has a dialog backend.
#[cfg(not(target_os = "macos"))]
#[track_caller]
#[instrument(skip(request), fields(title = %request.title))]
pub fn ask(request: &PromptRequest) -> AppResult<Option<String>> {
    Err(AppError::PromptFailed {
        reason: format!("No dialog backend on this platform for '{}'", request.title),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Map `osascript` results to an answer, a cancellation, or an error.
#[track_caller]
pub(crate) fn interpret_dialog_output(
    success: bool,
    stdout: &str,
    stderr: &str,
) -> AppResult<Option<String>> {
    if success {
        let answer = stdout.strip_suffix('\n').unwrap_or(stdout);
        return Ok(Some(answer.to_string()));
    }

    if stderr.contains(USER_CANCELED) {
        return Ok(None);
    }

    Err(AppError::PromptFailed {
        reason: format!("osascript failed: {}", stderr.trim()),
        location: ErrorLocation::from(Location::caller()),
    })
}
