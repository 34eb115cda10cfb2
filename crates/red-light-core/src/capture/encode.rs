use crate::{CoreResult, MonitorError};

use std::panic::Location;

use base64::{Engine, engine::general_purpose::STANDARD};
use error_location::ErrorLocation;
use image::{DynamicImage, codecs::jpeg::JpegEncoder, imageops::FilterType};
use tracing::debug;

/// A downsampled, JPEG-encoded, base64 screen snapshot ready for transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFrame {
    /// Base64 (standard alphabet, padded) JPEG bytes.
    pub base64: String,
    /// Width of the encoded image in pixels.
    pub width: u32,
    /// Height of the encoded image in pixels.
    pub height: u32,
}

impl EncodedFrame {
    /// MIME type of the payload.
    pub const MEDIA_TYPE: &'static str = "image/jpeg";
}

/// Resize `image` to `target_width` (height scaled to keep the aspect ratio)
/// and encode it as base64 JPEG at the given quality.
#[track_caller]
pub fn encode_frame(image: DynamicImage, target_width: u32, quality: u8) -> CoreResult<EncodedFrame> {
    let location = ErrorLocation::from(Location::caller());

    let (width, height) = (image.width().max(1), image.height());
    let target_width = target_width.max(1);
    let target_height = ((u64::from(height) * u64::from(target_width)) / u64::from(width)).max(1);
    let target_height = u32::try_from(target_height).unwrap_or(u32::MAX);

    let resized = image
        .resize_exact(target_width, target_height, FilterType::Triangle)
        .into_rgb8();

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality)
        .encode_image(&resized)
        .map_err(|source| MonitorError::EncodeFailed { source, location })?;

    debug!(
        source_width = width,
        source_height = height,
        width = target_width,
        height = target_height,
        jpeg_bytes = jpeg.len(),
        "Frame encoded"
    );

    Ok(EncodedFrame {
        base64: STANDARD.encode(&jpeg),
        width: target_width,
        height: target_height,
    })
}
