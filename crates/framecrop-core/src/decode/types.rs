//! Raster and error types shared by decoding and export.

use thiserror::Error;

use crate::layout::Size;

/// Errors that can occur while decoding the source image.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No bytes were supplied.
    #[error("Image data is empty")]
    Empty,

    /// The format could not be recognized.
    #[error("Unrecognized image format: {0}")]
    UnknownFormat(String),

    /// The data is recognized but could not be decoded.
    #[error("Failed to decode image: {0}")]
    Corrupted(String),

    /// The decoded image has a zero dimension.
    #[error("Decoded image has no pixels ({width}x{height})")]
    ZeroSized { width: u32, height: u32 },
}

/// An RGB image held in memory (3 bytes per pixel, row-major).
///
/// Used both for the loaded source image and for export results.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Wrap existing RGB data. The buffer must be `width * height * 3` bytes.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 3,
            "Pixel buffer size mismatch"
        );
        Self { width, height, pixels }
    }

    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Copy the pixels into an owned `image::RgbImage` for imageops.
    ///
    /// Returns `None` when the buffer length does not match the dimensions.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Natural size in pixels, as the layout calculator expects it.
    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// RGB value at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_size_and_pixel() {
        let mut pixels = vec![0u8; 4 * 2 * 3];
        // (3, 1) -> index (1 * 4 + 3) * 3 = 21
        pixels[21] = 10;
        pixels[22] = 20;
        pixels[23] = 30;
        let raster = Raster::new(4, 2, pixels);

        assert_eq!(raster.size(), Size::new(4.0, 2.0));
        assert_eq!(raster.pixel(3, 1), Some([10, 20, 30]));
        assert_eq!(raster.pixel(4, 0), None);
        assert!(!raster.is_empty());
    }

    #[test]
    fn test_raster_empty() {
        assert!(Raster::new(0, 0, vec![]).is_empty());
    }

    #[test]
    fn test_rgb_image_round_trip() {
        let img = image::RgbImage::from_pixel(3, 2, image::Rgb([1, 2, 3]));
        let raster = Raster::from_rgb_image(img);
        let img = raster.to_rgb_image().expect("valid buffer");
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0, [1, 2, 3]);
    }

    #[test]
    fn test_short_buffer_has_no_rgb_image() {
        let raster = Raster {
            width: 10,
            height: 10,
            pixels: vec![0u8; 30],
        };
        assert!(raster.to_rgb_image().is_none());
        assert!(Raster::new(2, 2, vec![0u8; 12]).to_rgb_image().is_some());
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::ZeroSized { width: 0, height: 5 };
        assert_eq!(err.to_string(), "Decoded image has no pixels (0x5)");
        assert_eq!(DecodeError::Empty.to_string(), "Image data is empty");
    }
}
