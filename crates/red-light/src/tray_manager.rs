//! Menu-bar status item with state-based updates.
//!
//! Shows the 🔴/🟢 glyph as the status-item title on macOS and a generated
//! colored dot icon elsewhere, plus the Start/Stop, Set Task, Set API Key,
//! and Quit menu.

use crate::{AppError, AppResult, MenuIds, TrayCommand, TrayDisplay, TrayIconState};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};
use tray_icon::menu::{IsMenuItem, Menu, MenuItem, PredefinedMenuItem};
use tray_icon::{TrayIcon, TrayIconBuilder};

const START_LABEL: &str = "Start Monitoring";
const STOP_LABEL: &str = "Stop Monitoring";

/// Menu-bar status item manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    toggle_item: MenuItem,
    menu_ids: MenuIds,
    display: TrayDisplay,
}

impl TrayManager {
    /// Create the status item in the idle state.
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let menu = Menu::new();

        let toggle_item = MenuItem::new(START_LABEL, true, None);
        let set_task_item = MenuItem::new("Set Task", true, None);
        let set_api_key_item = MenuItem::new("Set API Key", true, None);
        let quit_item = MenuItem::new("Quit", true, None);

        let menu_ids = MenuIds {
            toggle: toggle_item.id().clone(),
            set_task: set_task_item.id().clone(),
            set_api_key: set_api_key_item.id().clone(),
            quit: quit_item.id().clone(),
        };

        let task_separator = PredefinedMenuItem::separator();
        let key_separator = PredefinedMenuItem::separator();
        let items: [&dyn IsMenuItem; 6] = [
            &toggle_item,
            &set_task_item,
            &task_separator,
            &set_api_key_item,
            &key_separator,
            &quit_item,
        ];

        menu.append_items(&items).map_err(|e| AppError::TrayError {
            reason: format!("Failed to build menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let state = TrayIconState::Idle;
        let builder = TrayIconBuilder::new()
            .with_tooltip(state.tooltip())
            .with_menu(Box::new(menu));

        #[cfg(target_os = "macos")]
        let builder = builder.with_title(state.glyph());

        #[cfg(not(target_os = "macos"))]
        let builder = builder.with_icon(Self::load_icon(state)?);

        let tray_icon = builder.build().map_err(|e| AppError::TrayError {
            reason: format!("Failed to create tray icon: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!("Menu-bar status item initialized");

        Ok(Self {
            tray_icon,
            toggle_item,
            menu_ids,
            display: TrayDisplay::default(),
        })
    }

    /// Apply a command from the runtime thread.
    ///
    /// `SetMonitoring` flips the toggle label and resets the glyph.
    /// `SetState` repaints only while monitoring is on.
    #[track_caller]
    pub fn apply(&mut self, command: TrayCommand) -> AppResult<()> {
        if let TrayCommand::SetMonitoring(monitoring) = command {
            self.toggle_item
                .set_text(if monitoring { STOP_LABEL } else { START_LABEL });
        }

        match self.display.resolve(command) {
            Some(state) => self.update_state(state),
            None => {
                debug!(
                    command = ?command,
                    monitoring = self.display.is_monitoring(),
                    "Tray command ignored"
                );
                Ok(())
            }
        }
    }

    /// Update the glyph and tooltip.
    #[track_caller]
    #[instrument(skip(self))]
    fn update_state(&mut self, state: TrayIconState) -> AppResult<()> {
        #[cfg(target_os = "macos")]
        self.tray_icon.set_title(Some(state.glyph()));

        #[cfg(not(target_os = "macos"))]
        self.tray_icon
            .set_icon(Some(Self::load_icon(state)?))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.tray_icon
            .set_tooltip(Some(state.tooltip()))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(glyph = state.glyph(), "Tray state updated");

        Ok(())
    }

    /// Ids of the clickable menu items.
    pub fn menu_ids(&self) -> &MenuIds {
        &self.menu_ids
    }

    /// Build the dot icon for `state`.
    #[cfg(not(target_os = "macos"))]
    #[track_caller]
    fn load_icon(state: TrayIconState) -> AppResult<tray_icon::Icon> {
        let rgba = render_dot(state.color(), ICON_SIZE);
        let (width, height) = (rgba.width(), rgba.height());

        tray_icon::Icon::from_rgba(rgba.into_raw(), width, height).map_err(|e| {
            AppError::TrayError {
                reason: format!("Failed to create icon from RGBA: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }
}

#[cfg(any(test, not(target_os = "macos")))]
pub(crate) const ICON_SIZE: u32 = 32;

/// Filled circle of `color` on a transparent square.
#[cfg(any(test, not(target_os = "macos")))]
pub(crate) fn render_dot(color: [u8; 3], size: u32) -> image::RgbaImage {
    let center = (size as f32 - 1.0) / 2.0;
    let radius = size as f32 * 0.4;

    image::RgbaImage::from_fn(size, size, |x, y| {
        let (dx, dy) = (x as f32 - center, y as f32 - center);
        if dx * dx + dy * dy <= radius * radius {
            image::Rgba([color[0], color[1], color[2], 0xff])
        } else {
            image::Rgba([0, 0, 0, 0])
        }
    })
}
