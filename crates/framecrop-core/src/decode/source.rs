//! Decoding host-supplied image bytes into an upright RGB raster.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, Raster};

/// Decode JPEG or PNG bytes, applying EXIF orientation.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes as handed over by the host
///
/// # Returns
///
/// An upright RGB `Raster`. Its size is the natural size the layout
/// calculator works with, so a portrait photo stored sideways reports its
/// rotated dimensions.
///
/// # Errors
///
/// - [`DecodeError::Empty`] for an empty slice
/// - [`DecodeError::UnknownFormat`] when the format cannot be guessed
/// - [`DecodeError::Corrupted`] when decoding fails
/// - [`DecodeError::ZeroSized`] when the image has no pixels
pub fn decode_image(bytes: &[u8]) -> Result<Raster, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    let format = reader.format().ok_or_else(|| {
        DecodeError::UnknownFormat(format!("{} bytes, no known signature", bytes.len()))
    })?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    let orientation = read_orientation(bytes);
    let upright = apply_orientation(img, orientation).into_rgb8();

    let (width, height) = upright.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::ZeroSized { width, height });
    }

    tracing::debug!(?format, width, height, orientation, "decoded source image");
    Ok(Raster::from_rgb_image(upright))
}

/// Read the EXIF orientation tag of an image.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes (JPEG, or PNG with an `eXIf` chunk)
///
/// # Returns
///
/// The orientation value (1-8), or 1 when the tag is absent, unreadable, or
/// out of range.
pub fn read_orientation(bytes: &[u8]) -> u32 {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|data| {
            data.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .filter(|value| (1..=8).contains(value))
        .unwrap_or(1)
}

/// Rotate/flip so the pixels match the orientation the camera recorded.
fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}
