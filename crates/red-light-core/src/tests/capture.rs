use crate::{EncodedFrame, ScreenSource, XcapScreen, encode_frame};

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{DynamicImage, RgbaImage};

#[allow(clippy::unwrap_used)]
fn decode(frame: &EncodedFrame) -> DynamicImage {
    let bytes = STANDARD.decode(&frame.base64).unwrap();
    image::load_from_memory(&bytes).unwrap()
}

/// WHAT: A 16:9 frame is resized to 1280 wide keeping its aspect ratio
/// WHY: Payload size is bounded by the fixed target width
#[test]
#[allow(clippy::unwrap_used)]
fn given_wide_frame_when_encoding_then_resized_to_target_width() {
    // Given: A 2560x1440 RGBA frame
    let image = DynamicImage::ImageRgba8(RgbaImage::new(2560, 1440));

    // When: Encoding at the default width
    let frame = encode_frame(image, 1280, 85).unwrap();

    // Then: 1280x720 JPEG in base64
    assert_eq!((frame.width, frame.height), (1280, 720));
    let decoded = decode(&frame);
    assert_eq!((decoded.width(), decoded.height()), (1280, 720));
    assert!(STANDARD.decode(&frame.base64).unwrap().starts_with(&[0xFF, 0xD8]));
}

/// WHAT: Scaled height is rounded down
/// WHY: Matches integer truncation of height * target / width
#[test]
#[allow(clippy::unwrap_used)]
fn given_odd_aspect_frame_when_encoding_then_height_truncated() {
    // Given: A 1000x333 frame
    let image = DynamicImage::ImageRgba8(RgbaImage::new(1000, 333));

    // When: Encoding to 1280 wide
    let frame = encode_frame(image, 1280, 85).unwrap();

    // Then: 333 * 1.28 = 426.24 truncates to 426
    assert_eq!((frame.width, frame.height), (1280, 426));
}

/// WHAT: Very flat frames never scale to zero height
/// WHY: A zero-sized image cannot be encoded
#[test]
#[allow(clippy::unwrap_used)]
fn given_very_flat_frame_when_encoding_then_height_at_least_one() {
    // Given: A 5000x1 frame
    let image = DynamicImage::ImageRgba8(RgbaImage::new(5000, 1));

    // When: Encoding to 1280 wide
    let frame = encode_frame(image, 1280, 85).unwrap();

    // Then: Height clamps to one pixel
    assert_eq!((frame.width, frame.height), (1280, 1));
}

/// WHAT: Capturing the real primary display produces a 1280-wide frame
/// WHY: End-to-end check of xcap plus encoding
#[test]
#[ignore] // Requires a display and screen-recording permission - run manually with: cargo test -- --ignored
#[allow(clippy::unwrap_used)]
fn given_display_when_capturing_then_frame_is_target_width() {
    // Given: The default capturer
    let screen = XcapScreen::default();

    // When: Capturing
    let frame = screen.capture().unwrap();

    // Then: The frame has the default width
    assert_eq!(frame.width, 1280);
    assert!(!frame.base64.is_empty());
}
