use red_light_core::Verdict;

/// Tray icon states corresponding to monitoring status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconState {
    /// Monitoring is off.
    Idle,
    /// Last verdict (or a fresh start) says on task.
    OnTask,
    /// Last verdict says off task.
    OffTask,
}

impl TrayIconState {
    /// Status-bar glyph.
    pub fn glyph(self) -> &'static str {
        match self {
            TrayIconState::Idle | TrayIconState::OffTask => Verdict::OffTask.glyph(),
            TrayIconState::OnTask => Verdict::OnTask.glyph(),
        }
    }

    /// Hover text.
    pub fn tooltip(self) -> &'static str {
        match self {
            TrayIconState::Idle => "Red Light Green Light - Not monitoring",
            TrayIconState::OnTask => "Red Light Green Light - On task",
            TrayIconState::OffTask => "Red Light Green Light - Off task",
        }
    }

    /// RGB color of the generated dot icon.
    pub fn color(self) -> [u8; 3] {
        match self {
            TrayIconState::Idle => [0x9e, 0x2a, 0x2b],
            TrayIconState::OnTask => [0x2e, 0xb8, 0x4b],
            TrayIconState::OffTask => [0xe0, 0x31, 0x31],
        }
    }
}

impl From<Verdict> for TrayIconState {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::OnTask => TrayIconState::OnTask,
            Verdict::OffTask => TrayIconState::OffTask,
        }
    }
}
