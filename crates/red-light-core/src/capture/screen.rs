//! Primary-display capture via `xcap`.

use crate::{
    CoreResult, MonitorError,
    capture::{DEFAULT_JPEG_QUALITY, DEFAULT_TARGET_WIDTH, EncodedFrame, ScreenSource, encode_frame},
};

use std::panic::Location;

use error_location::ErrorLocation;
use image::DynamicImage;
use tracing::{debug, instrument};
use xcap::Monitor;

/// Captures the primary monitor and encodes it for the analyzer.
#[derive(Debug, Clone, Copy)]
pub struct XcapScreen {
    target_width: u32,
    jpeg_quality: u8,
}

impl XcapScreen {
    /// Create a capturer with the given resize width and JPEG quality.
    pub fn new(target_width: u32, jpeg_quality: u8) -> Self {
        Self {
            target_width,
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    #[track_caller]
    fn primary_monitor() -> CoreResult<Monitor> {
        let monitors = Monitor::all().map_err(|e| MonitorError::CaptureFailed {
            reason: format!("Failed to enumerate monitors: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let primary = monitors
            .iter()
            .position(|m| m.is_primary().unwrap_or(false))
            .unwrap_or(0);

        monitors
            .into_iter()
            .nth(primary)
            .ok_or_else(|| MonitorError::NoMonitorFound {
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl Default for XcapScreen {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_WIDTH, DEFAULT_JPEG_QUALITY)
    }
}

impl ScreenSource for XcapScreen {
    #[track_caller]
    #[instrument(skip(self))]
    fn capture(&self) -> CoreResult<EncodedFrame> {
        let monitor = Self::primary_monitor()?;

        let raw = monitor
            .capture_image()
            .map_err(|e| MonitorError::CaptureFailed {
                reason: format!("Failed to capture monitor: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(width = raw.width(), height = raw.height(), "Screen captured");

        encode_frame(
            DynamicImage::ImageRgba8(raw),
            self.target_width,
            self.jpeg_quality,
        )
    }
}
