//! Rasterizing the selection from the loaded image.
//!
//! The selection lives in display space (image-layout-local for rectangles,
//! container-local for circles). Export maps it into natural pixel space with
//! the per-axis ratio `natural / layout`, cuts that region out of the source
//! raster, and encodes it as PNG.
//!
//! # Output size
//!
//! - Rectangle: the pixel region's own size, so the crop keeps the source's
//!   native resolution and no resampling happens
//! - Circle: a fixed `output_size` square, resampled with the configured
//!   filter (avatars)
//!
//! Export reads state only; calling it repeatedly yields identical results.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{CropConfig, CropShape, ResampleFilter};
use crate::decode::Raster;
use crate::encode::{encode_png, png_data_url, EncodeError};
use crate::layout::{ImageLayout, Size};
use crate::selection::{CircleSelection, CropRect, Selection};

/// Errors that can occur while exporting a crop.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The selection variant does not match the configured shape.
    #[error("Selection does not match the configured crop shape")]
    ShapeMismatch,

    /// The source raster's buffer does not match its dimensions.
    #[error("Source image buffer has {len} bytes, expected {width}x{height} RGB")]
    InvalidSource { width: u32, height: u32, len: usize },

    /// PNG encoding failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// A region of the source image in natural pixel space (fractional).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A whole-pixel region of the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SourceRegion {
    /// Snap to whole pixels inside a `natural_width x natural_height` image.
    ///
    /// Edges are rounded independently and the result is at least 1x1.
    pub fn to_pixels(&self, natural_width: u32, natural_height: u32) -> PixelRegion {
        let (x, width) = snap_axis(self.x, self.width, natural_width);
        let (y, height) = snap_axis(self.y, self.height, natural_height);
        PixelRegion { x, y, width, height }
    }
}

fn snap_axis(start: f64, length: f64, limit: u32) -> (u32, u32) {
    let limit = limit.max(1) as f64;
    let first = start.round().max(0.0).min(limit - 1.0);
    let last = (start + length).round().min(limit).max(first + 1.0);
    (first as u32, (last - first) as u32)
}

/// Map a rectangle from image-layout space to natural pixel space.
pub fn rect_source_region(rect: &CropRect, layout: &ImageLayout, natural: Size) -> SourceRegion {
    let scale_x = natural.width / layout.width;
    let scale_y = natural.height / layout.height;

    SourceRegion {
        x: rect.x * scale_x,
        y: rect.y * scale_y,
        width: rect.width * scale_x,
        height: rect.height * scale_y,
    }
}

/// Map a circle's bounding square from container space to natural pixels.
///
/// The origin is clamped so the region never leaves the source image, even
/// when floating-point drift nudges the circle past the edge.
pub fn circle_source_region(
    circle: &CircleSelection,
    layout: &ImageLayout,
    natural: Size,
) -> SourceRegion {
    let scale_x = natural.width / layout.width;
    let scale_y = natural.height / layout.height;

    let width = (circle.radius * 2.0 * scale_x).min(natural.width);
    let height = (circle.radius * 2.0 * scale_y).min(natural.height);
    let x = (circle.center_x - circle.radius - layout.x) * scale_x;
    let y = (circle.center_y - circle.radius - layout.y) * scale_y;

    SourceRegion {
        x: x.min(natural.width - width).max(0.0),
        y: y.min(natural.height - height).max(0.0),
        width,
        height,
    }
}

/// Map either selection variant to natural pixel space.
pub fn selection_source_region(
    selection: &Selection,
    layout: &ImageLayout,
    natural: Size,
) -> SourceRegion {
    match selection {
        Selection::Rect(rect) => rect_source_region(rect, layout, natural),
        Selection::Circle(circle) => circle_source_region(circle, layout, natural),
    }
}

/// Cut `region` out of `image` and scale it to `out_width x out_height`.
///
/// When the output size matches the region the pixels are copied as-is.
///
/// # Arguments
///
/// * `image` - The loaded source image
/// * `region` - Whole-pixel region inside `image` (see [`SourceRegion::to_pixels`])
/// * `out_width`, `out_height` - Output dimensions, raised to at least 1
/// * `filter` - Resampling filter used when the sizes differ
///
/// # Errors
///
/// Returns [`ExportError::InvalidSource`] if the source buffer length does
/// not match its dimensions.
pub fn rasterize(
    image: &Raster,
    region: PixelRegion,
    out_width: u32,
    out_height: u32,
    filter: ResampleFilter,
) -> Result<Raster, ExportError> {
    let out_width = out_width.max(1);
    let out_height = out_height.max(1);

    let source = image.to_rgb_image().ok_or(ExportError::InvalidSource {
        width: image.width,
        height: image.height,
        len: image.pixels.len(),
    })?;

    let cropped =
        image::imageops::crop_imm(&source, region.x, region.y, region.width, region.height)
            .to_image();

    if cropped.dimensions() == (out_width, out_height) {
        return Ok(Raster::from_rgb_image(cropped));
    }

    let resized =
        image::imageops::resize(&cropped, out_width, out_height, filter.to_image_filter());
    Ok(Raster::from_rgb_image(resized))
}

/// A finished export.
#[derive(Debug, Clone)]
pub struct ExportedCrop {
    /// Where the crop came from, in natural pixels.
    pub source: SourceRegion,
    /// Cropped pixels.
    pub raster: Raster,
    /// PNG encoding of `raster`.
    pub png: Vec<u8>,
}

impl ExportedCrop {
    /// `data:image/png;base64,...` for the host's save callback.
    pub fn to_data_url(&self) -> String {
        png_data_url(&self.png)
    }
}

/// Export the current selection.
///
/// # Arguments
///
/// * `selection` - The live selection in display space
/// * `layout` - Where the image is drawn inside the container
/// * `image` - The decoded source image
/// * `config` - Shape (decides the output size) and resampling filter
///
/// # Returns
///
/// `Ok(None)` when there is nothing to export yet (no selection, no
/// layout, or no loaded image); export is guarded rather than failing.
/// Otherwise the cropped raster, its PNG bytes, and the source region.
///
/// # Errors
///
/// Returns `ExportError::ShapeMismatch` if the selection variant differs
/// from `config.shape`.
/// Returns `ExportError::InvalidSource` if the source buffer does not match
/// its dimensions.
/// Returns `ExportError::Encode` if PNG encoding fails.
pub fn export_selection(
    selection: Option<&Selection>,
    layout: Option<&ImageLayout>,
    image: Option<&Raster>,
    config: &CropConfig,
) -> Result<Option<ExportedCrop>, ExportError> {
    let (Some(selection), Some(layout), Some(image)) = (selection, layout, image) else {
        tracing::warn!("export requested before a selection exists, ignoring");
        return Ok(None);
    };
    if image.is_empty() || !layout.size().is_positive() {
        tracing::warn!("export requested without a usable image, ignoring");
        return Ok(None);
    }

    let source = selection_source_region(selection, layout, image.size());
    let region = source.to_pixels(image.width, image.height);

    let (out_width, out_height) = match (config.shape, selection) {
        (CropShape::Rect { .. }, Selection::Rect(_)) => (region.width, region.height),
        (CropShape::Circle { output_size }, Selection::Circle(_)) => {
            (output_size.max(1), output_size.max(1))
        }
        _ => return Err(ExportError::ShapeMismatch),
    };

    let raster = rasterize(image, region, out_width, out_height, config.filter)?;
    let png = encode_png(&raster.pixels, raster.width, raster.height)?;

    tracing::debug!(
        source_x = source.x,
        source_y = source.y,
        source_width = source.width,
        source_height = source.height,
        out_width,
        out_height,
        bytes = png.len(),
        "exported crop"
    );

    Ok(Some(ExportedCrop { source, raster, png }))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: snapped regions always lie inside the image and are non-empty.
        #[test]
        fn prop_pixel_region_inside_image(
            x in -50.0f64..1200.0,
            y in -50.0f64..1200.0,
            width in 0.0f64..1500.0,
            height in 0.0f64..1500.0,
            natural_w in 1u32..1000,
            natural_h in 1u32..1000,
        ) {
            let region = SourceRegion { x, y, width, height }.to_pixels(natural_w, natural_h);
            prop_assert!(region.width >= 1 && region.height >= 1);
            prop_assert!(region.x + region.width <= natural_w);
            prop_assert!(region.y + region.height <= natural_h);
        }

        /// Property: circle source regions never leave the natural image.
        #[test]
        fn prop_circle_region_inside_image(
            center_x in 0.0f64..600.0,
            center_y in 0.0f64..400.0,
            radius in 1.0f64..150.0,
            natural_w in 10.0f64..4000.0,
            natural_h in 10.0f64..4000.0,
        ) {
            let layout = ImageLayout { x: 50.0, y: 25.0, width: 500.0, height: 300.0 };
            let circle = CircleSelection::new(center_x, center_y, radius);
            let natural = Size::new(natural_w, natural_h);
            let source = circle_source_region(&circle, &layout, natural);

            prop_assert!(source.x >= 0.0 && source.y >= 0.0);
            prop_assert!(source.x + source.width <= natural_w * (1.0 + 1e-12));
            prop_assert!(source.y + source.height <= natural_h * (1.0 + 1e-12));
        }
    }
}
