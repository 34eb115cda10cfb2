mod supervisor;
mod worker;

pub use {
    supervisor::{MonitorSupervisor, StartRefusal, ToggleOutcome},
    worker::MonitorWorker,
};

use crate::Verdict;

/// Receives the user-facing effects of each monitoring cycle.
///
/// Called from the runtime thread; implementations must not block for long.
pub trait StatusSink {
    /// Reflect the latest verdict in the status glyph.
    fn show_verdict(&self, verdict: Verdict);

    /// Tell the user they drifted away from `task`.
    fn alert_off_task(&self, task: &str);
}
