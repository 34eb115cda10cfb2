use crate::{Notice, NoticeSink, Notifier, TrayChannel, TrayCommand, TrayIconState};

use std::sync::Mutex;

use red_light_core::{StatusSink, Verdict};
use tao::event_loop::EventLoopProxy;
use tracing::warn;

/// Routes monitoring results to the tray (via the UI thread) and to
/// desktop notifications.
pub struct TrayStatusSink {
    tray_proxy: Mutex<EventLoopProxy<TrayCommand>>,
    notifier: Notifier,
}

impl TrayStatusSink {
    /// Create a sink that posts tray updates through `tray_proxy`.
    pub fn new(tray_proxy: EventLoopProxy<TrayCommand>, notifier: Notifier) -> Self {
        Self {
            tray_proxy: Mutex::new(tray_proxy),
            notifier,
        }
    }
}

impl StatusSink for TrayStatusSink {
    fn show_verdict(&self, verdict: Verdict) {
        let command = TrayCommand::SetState(TrayIconState::from(verdict));

        match self.tray_proxy.lock() {
            Ok(proxy) => proxy.post(command),
            Err(e) => warn!(error = %e, "Tray proxy lock poisoned"),
        }
    }

    fn alert_off_task(&self, task: &str) {
        self.notifier.notify(Notice::OffTask {
            task: task.to_string(),
        });
    }
}
