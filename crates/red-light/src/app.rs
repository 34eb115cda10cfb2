use crate::{
    AppError, AppResult, MenuAction, MenuIds, Notice, NoticeSink, Notifier, TrayChannel,
    TrayCommand, TrayStatusSink,
    config::{CredentialStore, TaskStore},
    prompt::{self, PromptRequest},
};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use red_light_core::{
    AnthropicAnalyzer, MonitorSupervisor, StartRefusal, StatusSink, ToggleOutcome, XcapScreen,
};
use tao::event_loop::EventLoopProxy;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};
use tray_icon::menu::MenuEvent;

/// Number of leading key characters shown in the API key dialog.
const KEY_PREVIEW_CHARS: usize = 5;

/// Monitoring supervisor wired to the real screen and analyzer.
pub(crate) type Supervisor<U = TrayStatusSink> =
    MonitorSupervisor<XcapScreen, AnthropicAnalyzer, U>;

/// Menu-bar controller.
///
/// Runs on the async runtime thread. Tray updates go back to the main thread
/// through `tray` because `TrayIcon` is `!Send` and must remain on the
/// UI thread.
pub struct App<U = TrayStatusSink, N = Notifier, T = EventLoopProxy<TrayCommand>> {
    pub(crate) supervisor: Supervisor<U>,
    pub(crate) task_store: TaskStore,
    pub(crate) credential_store: CredentialStore,
    pub(crate) notifier: N,
    pub(crate) tray: T,
    pub(crate) menu_ids: MenuIds,
    pub(crate) quit_grace: Duration,
}

impl<U, N, T> App<U, N, T>
where
    U: StatusSink + Send + Sync + 'static,
    N: NoticeSink,
    T: TrayChannel,
{
    /// Run the menu event loop until Quit.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Menu controller running");

        // MenuEvent::receiver() is a blocking crossbeam receiver; forward it
        // into the runtime from one persistent blocking task. It ends when
        // menu_event_rx is dropped and the next blocking_send fails.
        let (menu_event_tx, mut menu_event_rx) = mpsc::channel(32);
        let forwarder = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if menu_event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        while let Some(event) = menu_event_rx.recv().await {
            let Some(action) = self.menu_ids.action_for(&event.id) else {
                continue;
            };

            if action == MenuAction::Quit {
                info!("Quit requested from menu");
                break;
            }

            if let Err(e) = self.handle_action(action).await {
                error!(action = ?action, error = ?e, "Failed to handle menu action");
            }
        }

        self.supervisor.shutdown(self.quit_grace).await;

        drop(menu_event_rx);

        match tokio::time::timeout(Duration::from_secs(1), forwarder).await {
            Ok(Ok(())) => info!("Menu event forwarder stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Menu event forwarder task panicked"),
            Err(_) => info!(
                "Menu event forwarder did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        self.post(TrayCommand::Shutdown);
        info!("red-light-green-light shut down successfully");

        Ok(())
    }

    async fn handle_action(&mut self, action: MenuAction) -> AppResult<()> {
        match action {
            MenuAction::ToggleMonitoring => self.toggle_monitoring().await,
            MenuAction::SetTask => self.set_task().await,
            MenuAction::SetApiKey => self.set_api_key().await,
            MenuAction::Quit => Ok(()),
        }
    }

    /// Start or stop monitoring, explaining any refusal.
    #[instrument(skip(self))]
    pub(crate) async fn toggle_monitoring(&mut self) -> AppResult<()> {
        match self.supervisor.toggle() {
            ToggleOutcome::Started(run_id) => {
                info!(run_id = %run_id, "Monitoring toggled on");
                self.post(TrayCommand::SetMonitoring(true));
            }
            ToggleOutcome::Stopped => {
                info!("Monitoring toggled off");
                self.post(TrayCommand::SetMonitoring(false));
            }
            ToggleOutcome::Refused(refusal) => {
                self.notifier.notify(Notice::for_refusal(refusal));
                if refusal == StartRefusal::MissingApiKey {
                    self.set_api_key().await?;
                }
            }
        }

        Ok(())
    }

    /// Ask for the task, then store and announce it.
    #[instrument(skip(self))]
    async fn set_task(&mut self) -> AppResult<()> {
        let current = self.supervisor.session().current_task;

        let answer = ask(PromptRequest {
            title: "Set Your Task".to_string(),
            message: "What are you planning to work on?".to_string(),
            default_text: current,
            secure: false,
        })
        .await?;

        let Some(task) = answer else {
            return Ok(());
        };

        self.supervisor.set_task(task.clone());
        if let Err(e) = self.task_store.save(&task) {
            error!(error = ?e, "Error saving task");
        }

        self.notifier.notify(Notice::TaskSaved { task });

        Ok(())
    }

    /// Ask for a new API key, then store it in the keychain.
    #[instrument(skip(self))]
    async fn set_api_key(&mut self) -> AppResult<()> {
        let current = self.supervisor.session().api_key.unwrap_or_default();
        let preview = masked_preview(&current);

        let answer = ask(PromptRequest {
            title: "API Key Setup".to_string(),
            message: "Enter your Anthropic API key:".to_string(),
            default_text: preview.clone(),
            secure: true,
        })
        .await?;

        let Some(api_key) = accepted_api_key(answer, &preview) else {
            return Ok(());
        };

        self.supervisor.set_api_key(api_key.clone());

        let store = self.credential_store.clone();
        tokio::task::spawn_blocking(move || store.save(&api_key))
            .await
            .map_err(|e| AppError::CredentialError {
                reason: format!("Keychain task panicked: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })??;

        self.notifier.notify(Notice::ApiKeySaved);

        Ok(())
    }

    fn post(&self, command: TrayCommand) {
        self.tray.post(command);
    }
}

/// Run a blocking dialog off the async workers.
async fn ask(request: PromptRequest) -> AppResult<Option<String>> {
    tokio::task::spawn_blocking(move || prompt::ask(&request))
        .await
        .map_err(|e| AppError::PromptFailed {
            reason: format!("Prompt task panicked: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?
}

/// First few characters of `key` followed by `...`, or empty.
pub(crate) fn masked_preview(key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }

    let head: String = key.chars().take(KEY_PREVIEW_CHARS).collect();
    format!("{}...", head)
}

/// The dialog answer to store, if any. The untouched preview is not a key.
pub(crate) fn accepted_api_key(answer: Option<String>, preview: &str) -> Option<String> {
    answer.filter(|text| !text.is_empty() && text != preview)
}
