use crate::{TrayCommand, TrayIconState};

/// Decides what the status item shows for each incoming command.
///
/// Verdicts are only painted while monitoring is on. A verdict posted just
/// before a stop can reach the main thread after the stop; it is dropped so
/// a stopped session stays red.
#[derive(Debug, Default)]
pub struct TrayDisplay {
    monitoring: bool,
}

impl TrayDisplay {
    /// Whether monitoring is currently shown as on.
    pub fn is_monitoring(&self) -> bool {
        self.monitoring
    }

    /// State to paint for `command`, or `None` if nothing should change.
    pub fn resolve(&mut self, command: TrayCommand) -> Option<TrayIconState> {
        match command {
            TrayCommand::SetMonitoring(true) => {
                self.monitoring = true;
                Some(TrayIconState::OnTask)
            }
            TrayCommand::SetMonitoring(false) => {
                self.monitoring = false;
                Some(TrayIconState::Idle)
            }
            TrayCommand::SetState(state) if self.monitoring => Some(state),
            TrayCommand::SetState(_) | TrayCommand::Shutdown => None,
        }
    }
}
