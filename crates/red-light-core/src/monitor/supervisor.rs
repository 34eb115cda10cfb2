//! Owns the session state and the lifecycle of the monitoring task.
//!
//! Start/stop is a two-state machine over `Session::enabled`. Every start
//! mints a new run id, so a worker that is still finishing its last cycle
//! from a previous run sees the mismatch and exits instead of running
//! alongside the new one. The new worker waits for the old task to finish
//! before its first capture, which keeps cycles strictly sequential.

use crate::{MonitorWorker, ScreenSource, Session, StatusSink, TaskJudge};

use std::{sync::Arc, time::Duration};

use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Why a start request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartRefusal {
    /// No API key is configured.
    MissingApiKey,
    /// The declared task is empty.
    MissingTask,
}

/// Result of toggling monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Monitoring was started with the given run id.
    Started(Uuid),
    /// Monitoring was stopped.
    Stopped,
    /// Monitoring stayed off because a precondition failed.
    Refused(StartRefusal),
}

/// Session owner and monitoring task manager.
pub struct MonitorSupervisor<S, J, U> {
    screen: Arc<S>,
    judge: Arc<J>,
    sink: Arc<U>,
    interval: Duration,
    session_tx: watch::Sender<Session>,
    handle: Option<JoinHandle<()>>,
}

impl<S, J, U> MonitorSupervisor<S, J, U>
where
    S: ScreenSource + Send + Sync + 'static,
    J: TaskJudge + Send + Sync + 'static,
    U: StatusSink + Send + Sync + 'static,
{
    /// Create a supervisor around an initial (disabled) session.
    pub fn new(screen: S, judge: J, sink: U, interval: Duration, session: Session) -> Self {
        let (session_tx, _) = watch::channel(session);

        Self {
            screen: Arc::new(screen),
            judge: Arc::new(judge),
            sink: Arc::new(sink),
            interval,
            session_tx,
            handle: None,
        }
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.session_tx.borrow().clone()
    }

    /// Whether monitoring is switched on.
    pub fn is_enabled(&self) -> bool {
        self.session_tx.borrow().enabled
    }

    /// Replace the declared task. Does not affect `enabled`.
    pub fn set_task(&self, task: String) {
        self.session_tx.send_modify(|s| s.current_task = task);
    }

    /// Replace the API key. Does not affect `enabled`.
    pub fn set_api_key(&self, api_key: String) {
        self.session_tx.send_modify(|s| s.api_key = Some(api_key));
    }

    /// Start if stopped, stop if started.
    pub fn toggle(&mut self) -> ToggleOutcome {
        if self.is_enabled() {
            self.stop();
            ToggleOutcome::Stopped
        } else {
            match self.start() {
                Ok(run_id) => ToggleOutcome::Started(run_id),
                Err(refusal) => ToggleOutcome::Refused(refusal),
            }
        }
    }

    /// Enable monitoring and spawn a worker for a fresh run.
    ///
    /// Must be called from within a tokio runtime. Starting while already
    /// enabled returns the current run id without spawning.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Result<Uuid, StartRefusal> {
        let session = self.session();

        if session.enabled {
            return Ok(session.run_id);
        }
        if !session.has_api_key() {
            warn!("Refusing to start monitoring: API key missing");
            return Err(StartRefusal::MissingApiKey);
        }
        if session.current_task.is_empty() {
            warn!("Refusing to start monitoring: no task set");
            return Err(StartRefusal::MissingTask);
        }

        let run_id = Uuid::new_v4();
        self.session_tx.send_modify(|s| {
            s.enabled = true;
            s.run_id = run_id;
        });

        let worker = MonitorWorker {
            screen: Arc::clone(&self.screen),
            judge: Arc::clone(&self.judge),
            sink: Arc::clone(&self.sink),
            interval: self.interval,
            run_id,
            session_rx: self.session_tx.subscribe(),
        };
        let previous = self.handle.take();

        self.handle = Some(tokio::spawn(async move {
            if let Some(previous) = previous {
                debug!("Waiting for previous monitoring run to finish");
                let _ = previous.await;
            }
            worker.run().await;
        }));

        info!(run_id = %run_id, task = %session.current_task, "Monitoring started");

        Ok(run_id)
    }

    /// Disable monitoring. The worker exits at its next cycle boundary.
    #[instrument(skip(self))]
    pub fn stop(&mut self) {
        let was_enabled = self.session_tx.send_if_modified(|s| {
            let changed = s.enabled;
            s.enabled = false;
            changed
        });

        if was_enabled {
            info!("Monitoring stopped");
        }
    }

    /// True while a worker task (current or draining) has not exited.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop monitoring and give the worker up to `grace` to exit.
    ///
    /// Best effort: a worker still blocked in capture or a request after
    /// the grace period is left to be torn down with the process.
    #[instrument(skip(self))]
    pub async fn shutdown(&mut self, grace: Duration) {
        self.stop();

        let Some(handle) = self.handle.take() else {
            return;
        };

        match tokio::time::timeout(grace, handle).await {
            Ok(Ok(())) => info!("Monitoring task stopped cleanly"),
            Ok(Err(e)) => warn!(error = ?e, "Monitoring task panicked"),
            Err(_) => info!(
                "Monitoring task did not stop within grace period, \
                 will be cleaned up on exit"
            ),
        }
    }
}
