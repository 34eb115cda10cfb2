use crate::{
    App, MenuIds, Notice, NoticeSink, TrayChannel, TrayCommand,
    app::{accepted_api_key, masked_preview},
    config::{CredentialStore, TaskStore},
};

use std::{sync::Mutex, time::Duration};

use red_light_core::{
    AnalyzerOptions, AnthropicAnalyzer, MonitorSupervisor, Session, StatusSink, Verdict,
    XcapScreen,
};
use tempfile::TempDir;
use tray_icon::menu::MenuId;

/// WHAT: The key preview shows the first five characters
/// WHY: Users can recognize their key without it being fully displayed
#[test]
fn given_key_when_masking_then_first_five_chars_shown() {
    // Given/When/Then: Long keys are truncated, empty stays empty
    assert_eq!(masked_preview("sk-ant-api03-secret"), "sk-an...");
    assert_eq!(masked_preview("abc"), "abc...");
    assert_eq!(masked_preview(""), "");
}

/// WHAT: Masking counts characters, not bytes
/// WHY: Slicing a multi-byte key by bytes would panic
#[test]
fn given_multibyte_key_when_masking_then_no_split() {
    // Given/When/Then: Five characters are kept intact
    assert_eq!(masked_preview("ключ-секрет"), "ключ-...");
}

/// WHAT: Saving the untouched preview keeps the old key
/// WHY: The preview is not a valid key and must not overwrite the real one
#[test]
fn given_preview_answer_when_accepting_then_rejected() {
    // Given: The preview shown in the dialog
    let preview = masked_preview("sk-ant-api03-secret");

    // When/Then: Saving it unchanged is ignored
    assert_eq!(accepted_api_key(Some(preview.clone()), &preview), None);
}

/// WHAT: Empty answers and Cancel keep the old key
/// WHY: Only a real new key should replace the stored one
#[test]
fn given_empty_or_cancelled_answer_when_accepting_then_rejected() {
    // Given/When/Then: Empty text and Cancel are ignored
    assert_eq!(accepted_api_key(Some(String::new()), "sk-an..."), None);
    assert_eq!(accepted_api_key(None, "sk-an..."), None);
}

/// WHAT: A new key is accepted
/// WHY: Typing a fresh key must update the session and the keychain
#[test]
fn given_new_key_when_accepting_then_returned() {
    // Given/When/Then: A different non-empty answer is accepted
    assert_eq!(
        accepted_api_key(Some("sk-new".to_string()), "sk-an..."),
        Some("sk-new".to_string())
    );
}

/// Notice sink that keeps every notice it is handed.
#[derive(Default)]
struct RecordingNotices(Mutex<Vec<Notice>>);

impl NoticeSink for RecordingNotices {
    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.0.lock() {
            notices.push(notice);
        }
    }
}

/// Tray channel that keeps every command it is handed.
#[derive(Default)]
struct RecordingTray(Mutex<Vec<TrayCommand>>);

impl TrayChannel for RecordingTray {
    fn post(&self, command: TrayCommand) {
        if let Ok(mut commands) = self.0.lock() {
            commands.push(command);
        }
    }
}

struct NullSink;

impl StatusSink for NullSink {
    fn show_verdict(&self, _verdict: Verdict) {}

    fn alert_off_task(&self, _task: &str) {}
}

#[allow(clippy::unwrap_used)]
fn app_with(
    session: Session,
    config_dir: &TempDir,
) -> App<NullSink, RecordingNotices, RecordingTray> {
    App {
        supervisor: MonitorSupervisor::new(
            XcapScreen::default(),
            AnthropicAnalyzer::new(AnalyzerOptions::default()).unwrap(),
            NullSink,
            Duration::from_secs(10),
            session,
        ),
        task_store: TaskStore::with_path(config_dir.path().join("config.json")),
        credential_store: CredentialStore::new(),
        notifier: RecordingNotices::default(),
        tray: RecordingTray::default(),
        menu_ids: MenuIds {
            toggle: MenuId::new("toggle"),
            set_task: MenuId::new("set-task"),
            set_api_key: MenuId::new("set-api-key"),
            quit: MenuId::new("quit"),
        },
        quit_grace: Duration::from_millis(500),
    }
}

/// WHAT: Toggling with a key but no task raises exactly one notice
/// WHY: The user learns what is missing once and the tray stays idle
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_key_without_task_when_toggling_then_one_task_missing_notice() {
    // Given: A session with an API key and an empty task
    let dir = TempDir::new().unwrap();
    let mut app = app_with(
        Session::new(String::new(), Some("sk-test".to_string())),
        &dir,
    );

    // When: Toggling monitoring
    app.toggle_monitoring().await.unwrap();

    // Then: One missing-task notice, no tray command, monitoring still off
    assert_eq!(*app.notifier.0.lock().unwrap(), vec![Notice::TaskMissing]);
    assert!(app.tray.0.lock().unwrap().is_empty());
    assert!(!app.supervisor.is_enabled());
    assert!(!app.supervisor.is_running());
}

/// WHAT: Each refused toggle raises its own single notice
/// WHY: Repeated clicks must not be swallowed or multiplied
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_repeated_refusals_when_toggling_then_one_notice_each() {
    // Given: A session with an API key and an empty task
    let dir = TempDir::new().unwrap();
    let mut app = app_with(
        Session::new(String::new(), Some("sk-test".to_string())),
        &dir,
    );

    // When: Toggling twice
    app.toggle_monitoring().await.unwrap();
    app.toggle_monitoring().await.unwrap();

    // Then: Two notices, still no tray command
    assert_eq!(
        *app.notifier.0.lock().unwrap(),
        vec![Notice::TaskMissing, Notice::TaskMissing]
    );
    assert!(app.tray.0.lock().unwrap().is_empty());
}
