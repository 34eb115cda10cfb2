//! The monitoring loop: capture, analyze, publish, sleep.
//!
//! One worker runs per monitoring run. It reads the shared [`Session`]
//! through a `watch` receiver, taking a snapshot at the top of each cycle,
//! and exits at the first cycle boundary where the session is no longer
//! active for its run id.

use crate::{
    CoreResult, MonitorError, ScreenSource, Session, StatusSink, TaskJudge, Verdict,
};

use std::{panic::Location, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// A single monitoring run bound to one run id.
pub struct MonitorWorker<S, J, U> {
    pub(crate) screen: Arc<S>,
    pub(crate) judge: Arc<J>,
    pub(crate) sink: Arc<U>,
    pub(crate) interval: Duration,
    pub(crate) run_id: Uuid,
    pub(crate) session_rx: watch::Receiver<Session>,
}

impl<S, J, U> MonitorWorker<S, J, U>
where
    S: ScreenSource + Send + Sync + 'static,
    J: TaskJudge + Send + Sync + 'static,
    U: StatusSink + Send + Sync + 'static,
{
    /// Run cycles until the session stops being active for this run.
    #[instrument(skip(self), fields(run_id = %self.run_id))]
    pub async fn run(mut self) {
        info!(interval_secs = self.interval.as_secs_f64(), "Monitoring loop started");

        let mut cycle: u64 = 0;

        loop {
            let snapshot = self.session_rx.borrow().clone();
            if !snapshot.is_active(self.run_id) {
                break;
            }

            cycle += 1;
            match self.run_cycle(&snapshot).await {
                Ok(verdict) => self.publish(verdict, &snapshot.current_task, cycle),
                Err(e) => error!(cycle, error = %e, "Monitoring cycle failed"),
            }

            let run_id = self.run_id;
            let session_rx = &mut self.session_rx;
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = async move { let _ = session_rx.wait_for(|s| !s.is_active(run_id)).await; } => {
                    debug!("Session deactivated during sleep");
                    break;
                }
            }
        }

        info!(cycles = cycle, "Monitoring loop stopped");
    }

    /// Capture one frame and judge it against the snapshot's task.
    async fn run_cycle(&self, snapshot: &Session) -> CoreResult<Verdict> {
        let screen = Arc::clone(&self.screen);
        let frame = tokio::task::spawn_blocking(move || screen.capture())
            .await
            .map_err(|e| MonitorError::CaptureFailed {
                reason: format!("Capture worker panicked: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })??;

        let api_key = snapshot.api_key.as_deref().unwrap_or_default();
        let verdict = self
            .judge
            .analyze(&frame, &snapshot.current_task, api_key)
            .await;

        Ok(verdict)
    }

    fn publish(&self, verdict: Verdict, task: &str, cycle: u64) {
        // A run stopped mid-cycle must not repaint the glyph.
        if !self.session_rx.borrow().is_active(self.run_id) {
            debug!(cycle, verdict = %verdict, "Discarding verdict from stopped run");
            return;
        }

        info!(cycle, verdict = %verdict, "Cycle complete");

        self.sink.show_verdict(verdict);
        if verdict == Verdict::OffTask {
            self.sink.alert_off_task(task);
        }
    }
}
