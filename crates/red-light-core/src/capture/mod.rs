mod encode;
mod screen;

pub use {
    encode::{EncodedFrame, encode_frame},
    screen::XcapScreen,
};

use crate::CoreResult;

/// Default width frames are resized to before encoding.
pub(crate) const DEFAULT_TARGET_WIDTH: u32 = 1280;
/// Default JPEG quality for encoded frames.
pub(crate) const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Something that can produce an encoded snapshot of the screen.
///
/// Called from a blocking worker thread, so implementations may block.
pub trait ScreenSource {
    /// Capture the current screen contents.
    fn capture(&self) -> CoreResult<EncodedFrame>;
}
