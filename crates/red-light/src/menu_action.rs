use tray_icon::menu::MenuId;

/// What a menu click asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Start or stop monitoring.
    ToggleMonitoring,
    /// Edit the declared task.
    SetTask,
    /// Enter a new API key.
    SetApiKey,
    /// Stop monitoring and exit.
    Quit,
}

/// Ids of the clickable menu items, shareable with the runtime thread.
#[derive(Debug, Clone)]
pub struct MenuIds {
    pub(crate) toggle: MenuId,
    pub(crate) set_task: MenuId,
    pub(crate) set_api_key: MenuId,
    pub(crate) quit: MenuId,
}

impl MenuIds {
    /// Action for a clicked item, if the id is one of ours.
    pub fn action_for(&self, id: &MenuId) -> Option<MenuAction> {
        if *id == self.toggle {
            Some(MenuAction::ToggleMonitoring)
        } else if *id == self.set_task {
            Some(MenuAction::SetTask)
        } else if *id == self.set_api_key {
            Some(MenuAction::SetApiKey)
        } else if *id == self.quit {
            Some(MenuAction::Quit)
        } else {
            None
        }
    }
}
