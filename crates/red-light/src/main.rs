//! Red Light Green Light: a menu-bar focus monitor that periodically asks a
//! vision model whether the screen matches the declared task.

mod app;
mod config;
mod error;
mod logging;
mod menu_action;
mod notice;
mod prompt;
#[cfg(test)]
mod tests;
mod tray_command;
mod tray_display;
mod tray_icon_state;
mod tray_manager;
mod tray_status_sink;

pub(crate) use {
    app::App,
    error::{AppError, Result as AppResult},
    menu_action::{MenuAction, MenuIds},
    notice::{Notice, NoticeSink, Notifier},
    tray_command::{TrayChannel, TrayCommand},
    tray_display::TrayDisplay,
    tray_icon_state::TrayIconState,
    tray_manager::TrayManager,
    tray_status_sink::TrayStatusSink,
};

use crate::config::{CredentialStore, Settings, TaskStore};

use red_light_core::{AnthropicAnalyzer, MonitorSupervisor, Session};
use tao::{
    event::Event,
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tracing::{error, info};

/// Everything loaded from disk and the keychain before the runtime starts.
struct Startup {
    settings: Settings,
    task_store: TaskStore,
    credential_store: CredentialStore,
    session: Session,
    analyzer: AnthropicAnalyzer,
}

impl Startup {
    #[track_caller]
    fn load() -> AppResult<Self> {
        let settings = Settings::load()?;
        let task_store = TaskStore::new()?;
        let credential_store = CredentialStore::new();

        let session = Session::new(task_store.load(), credential_store.load());
        info!(
            config_path = ?task_store.path(),
            has_task = !session.current_task.is_empty(),
            has_api_key = session.has_api_key(),
            "Session restored"
        );

        let analyzer = AnthropicAnalyzer::new((&settings.analyzer).into())?;

        Ok(Self {
            settings,
            task_store,
            credential_store,
            session,
            analyzer,
        })
    }
}

/// Application entry point.
fn main() {
    let log_guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {:?}", e);
            std::process::exit(1);
        }
    };

    info!("Starting red-light-green-light");

    #[allow(unused_mut)]
    let mut event_loop = EventLoopBuilder::<TrayCommand>::with_user_event().build();

    // Menu-bar only: no Dock icon, no app switcher entry.
    #[cfg(target_os = "macos")]
    {
        use tao::platform::macos::{ActivationPolicy, EventLoopExtMacOS};
        event_loop.set_activation_policy(ActivationPolicy::Accessory);
    }

    let tray_proxy = event_loop.create_proxy();

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let mut tray_manager = match TrayManager::new() {
        Ok(tm) => tm,
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => {
                if cmd == TrayCommand::Shutdown {
                    *control_flow = ControlFlow::ExitWithCode(0);
                } else if let Err(e) = tray_manager.apply(cmd) {
                    error!(error = ?e, "Failed to update tray");
                }
                return;
            }
            Event::NewEvents(tao::event::StartCause::Init) => {
                let Startup {
                    settings,
                    task_store,
                    credential_store,
                    session,
                    analyzer,
                } = match Startup::load() {
                    Ok(startup) => startup,
                    Err(e) => {
                        error!("Startup failed: {:?}", e);
                        std::process::exit(1);
                    }
                };

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                let tray_proxy = tray_proxy.clone();
                let menu_ids = tray_manager.menu_ids().clone();

                // Spawn tokio runtime on separate thread.
                // TrayManager stays on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        let notifier = Notifier;
                        let supervisor = MonitorSupervisor::new(
                            settings.capture.screen(),
                            analyzer,
                            TrayStatusSink::new(tray_proxy.clone(), notifier),
                            settings.monitor.check_interval(),
                            session,
                        );

                        let app = App {
                            supervisor,
                            task_store,
                            credential_store,
                            notifier,
                            tray: tray_proxy,
                            menu_ids,
                            quit_grace: settings.monitor.quit_grace(),
                        };

                        if let Err(e) = app.run().await {
                            error!(error = ?e, "App error");
                        }
                    });
                });
            }
            _ => {}
        }

        // Keep the log writer alive for the app's lifetime.
        let _ = &log_guard;
    });
}
