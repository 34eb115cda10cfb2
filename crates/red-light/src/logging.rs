//! Tracing setup: stdout plus a daily-rolling log file under the config dir.

use crate::{AppError, AppResult, config::config_dir};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "red_light=debug,red_light_core=debug";
const LOG_FILE_PREFIX: &str = "red-light.log";

/// Install the global subscriber. Keep the returned guard alive for the
/// lifetime of the process so buffered file output is flushed.
#[track_caller]
pub(crate) fn init() -> AppResult<WorkerGuard> {
    let log_dir = config_dir()?.join("logs");
    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .try_init()
        .map_err(|e| AppError::ConfigError {
            reason: format!("Failed to initialize logging: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(guard)
}
