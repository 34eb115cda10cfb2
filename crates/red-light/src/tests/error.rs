use crate::AppError;

use std::{error::Error, panic::Location};

use error_location::ErrorLocation;
use red_light_core::MonitorError;

fn failing_startup_step() -> Result<(), MonitorError> {
    Err(MonitorError::AnalysisFailed {
        reason: "client unavailable".to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}

fn startup() -> crate::AppResult<()> {
    failing_startup_step()?;
    Ok(())
}

/// WHAT: Core errors raised during startup surface as AppError::Monitor
/// WHY: Startup failures must keep the underlying cause for the exit log
#[test]
#[allow(clippy::unwrap_used)]
fn given_core_error_when_propagated_then_monitor_variant_keeps_source() {
    // Given/When: A startup step fails with a core error
    let result = startup();

    // Then: The app error wraps it and exposes it as the source
    let err = result.unwrap_err();
    assert!(matches!(err, AppError::Monitor { .. }));
    let source = err.source().map(ToString::to_string).unwrap_or_default();
    assert!(source.contains("client unavailable"));
}
