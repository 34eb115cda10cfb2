use crate::config::{default_jpeg_quality, default_target_width};

use red_light_core::XcapScreen;

use serde::{Deserialize, Serialize};

/// Screen capture sizing and compression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureSettings {
    /// Width in pixels frames are resized to before upload.
    #[serde(default = "default_target_width")]
    pub target_width: u32,

    /// JPEG quality, 1-100.
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl CaptureSettings {
    /// Build the screen capturer these settings describe.
    pub fn screen(&self) -> XcapScreen {
        XcapScreen::new(self.target_width, self.jpeg_quality)
    }
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            target_width: default_target_width(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}
