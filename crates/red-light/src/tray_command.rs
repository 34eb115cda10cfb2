use crate::TrayIconState;

use tao::event_loop::EventLoopProxy;
use tracing::warn;

/// Commands sent from the async runtime to the main UI thread.
///
/// The main thread owns `TrayManager` (because `TrayIcon` is `!Send`),
/// so all tray mutations and process lifecycle events flow through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayCommand {
    /// Update the tray icon to a new state.
    SetState(TrayIconState),
    /// Flip the toggle item label and reset the glyph for the new mode.
    SetMonitoring(bool),
    /// Shut down the application. The main thread will exit the event loop.
    Shutdown,
}

/// Route from the runtime thread to whoever owns the tray.
pub trait TrayChannel {
    /// Deliver `command`. A closed channel is logged, not returned.
    fn post(&self, command: TrayCommand);
}

impl TrayChannel for EventLoopProxy<TrayCommand> {
    fn post(&self, command: TrayCommand) {
        if let Err(e) = self.send_event(command) {
            warn!(error = ?e, "Failed to post tray command, event loop closed");
        }
    }
}
