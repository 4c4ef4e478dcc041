//! PNG encoding and data URL serialization.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

/// MIME type of the encoded export.
pub const PNG_MIME: &str = "image/png";

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder itself failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGB pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
///
/// PNG-encoded bytes (default compression, adaptive filtering).
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` if either dimension is zero.
/// Returns `EncodeError::InvalidPixelData` if `pixels` is not
/// `width * height * 3` bytes long.
/// Returns `EncodeError::EncodingFailed` if the encoder itself fails.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let encoder =
        PngEncoder::new_with_quality(&mut buffer, CompressionType::Default, FilterType::Adaptive);
    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Wrap PNG bytes in a base64 `data:image/png` URL.
///
/// # Arguments
///
/// * `png` - Encoded PNG bytes, usually from [`encode_png`]
///
/// # Returns
///
/// `data:image/png;base64,...` using the standard padded alphabet, ready to
/// hand to the host's save callback or an `<img src>`.
pub fn png_data_url(png: &[u8]) -> String {
    format!("data:{};base64,{}", PNG_MIME, STANDARD.encode(png))
}
