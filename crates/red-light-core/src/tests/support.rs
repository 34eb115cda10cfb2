//! Test doubles for the monitoring pipeline.

use crate::{CoreResult, EncodedFrame, MonitorError, ScreenSource, StatusSink, TaskJudge, Verdict};

use std::{
    collections::VecDeque,
    future::Future,
    panic::Location,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use error_location::ErrorLocation;
use tokio::time::Instant;

/// Shared counters used to observe capture/analyze pairs.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    pub(crate) captures: AtomicUsize,
    pub(crate) analyses: AtomicUsize,
    in_flight: AtomicUsize,
    pub(crate) max_in_flight: AtomicUsize,
    pub(crate) analyzed_at: Mutex<Vec<Instant>>,
}

impl Tally {
    pub(crate) fn captures(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }

    pub(crate) fn analyses(&self) -> usize {
        self.analyses.load(Ordering::SeqCst)
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Screen that returns a tiny fixed frame, optionally failing on given cycles.
pub(crate) struct FakeScreen {
    pub(crate) tally: Arc<Tally>,
    /// 1-based capture numbers that should fail.
    pub(crate) fail_on: Vec<usize>,
}

impl FakeScreen {
    pub(crate) fn new(tally: Arc<Tally>) -> Self {
        Self {
            tally,
            fail_on: Vec::new(),
        }
    }
}

impl ScreenSource for FakeScreen {
    fn capture(&self) -> CoreResult<EncodedFrame> {
        let n = self.tally.captures.fetch_add(1, Ordering::SeqCst) + 1;

        if self.fail_on.contains(&n) {
            return Err(MonitorError::CaptureFailed {
                reason: format!("simulated failure on capture {}", n),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.tally.enter();
        Ok(EncodedFrame {
            base64: "AAAA".to_string(),
            width: 1,
            height: 1,
        })
    }
}

/// Judge that replays a fixed verdict script, then answers `OnTask`.
pub(crate) struct ScriptedJudge {
    pub(crate) tally: Arc<Tally>,
    script: Mutex<VecDeque<Verdict>>,
    pub(crate) tasks_seen: Mutex<Vec<String>>,
}

impl ScriptedJudge {
    pub(crate) fn new(tally: Arc<Tally>, script: impl IntoIterator<Item = Verdict>) -> Self {
        Self {
            tally,
            script: Mutex::new(script.into_iter().collect()),
            tasks_seen: Mutex::new(Vec::new()),
        }
    }
}

impl TaskJudge for ScriptedJudge {
    fn analyze<'a>(
        &'a self,
        _frame: &'a EncodedFrame,
        task: &'a str,
        _api_key: &'a str,
    ) -> impl Future<Output = Verdict> + Send + 'a {
        async move {
            self.tally.analyses.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut at) = self.tally.analyzed_at.lock() {
                at.push(Instant::now());
            }
            if let Ok(mut seen) = self.tasks_seen.lock() {
                seen.push(task.to_string());
            }

            // Yield so an overlapping cycle would have a chance to start.
            tokio::task::yield_now().await;

            let verdict = self
                .script
                .lock()
                .ok()
                .and_then(|mut s| s.pop_front())
                .unwrap_or_default();

            self.tally.leave();
            verdict
        }
    }
}

/// Judge that takes `delay` to answer with a fixed verdict.
pub(crate) struct SlowJudge {
    pub(crate) tally: Arc<Tally>,
    pub(crate) delay: Duration,
    pub(crate) verdict: Verdict,
}

impl TaskJudge for SlowJudge {
    fn analyze<'a>(
        &'a self,
        _frame: &'a EncodedFrame,
        _task: &'a str,
        _api_key: &'a str,
    ) -> impl Future<Output = Verdict> + Send + 'a {
        async move {
            self.tally.analyses.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.tally.leave();
            self.verdict
        }
    }
}

/// Sink that records glyphs and alerts in order.
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub(crate) glyphs: Mutex<Vec<&'static str>>,
    pub(crate) alerts: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub(crate) fn glyphs(&self) -> Vec<&'static str> {
        self.glyphs.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub(crate) fn alerts(&self) -> Vec<String> {
        self.alerts.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl StatusSink for RecordingSink {
    fn show_verdict(&self, verdict: Verdict) {
        if let Ok(mut glyphs) = self.glyphs.lock() {
            glyphs.push(verdict.glyph());
        }
    }

    fn alert_off_task(&self, task: &str) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(task.to_string());
        }
    }
}

impl StatusSink for Arc<RecordingSink> {
    fn show_verdict(&self, verdict: Verdict) {
        self.as_ref().show_verdict(verdict);
    }

    fn alert_off_task(&self, task: &str) {
        self.as_ref().alert_off_task(task);
    }
}

/// Poll `condition` on the (paused) tokio clock until it holds.
pub(crate) async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..10_000 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    false
}
