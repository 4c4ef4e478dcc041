//! Crop editor configuration.
//!
//! The host passes a [`CropConfig`] when it opens an editor. Every field has
//! a default, so a partial (or empty) object deserializes cleanly:
//!
//! ```json
//! { "shape": { "kind": "rect", "aspect": 1.7778 } }
//! { "shape": { "kind": "circle", "output_size": 256 }, "min_radius": 40 }
//! ```

use serde::{Deserialize, Serialize};

/// Default lower bound for the rectangle width, in display pixels.
pub const DEFAULT_MIN_CROP_SIZE: f64 = 64.0;
/// Default lower bound for the circle radius, in display pixels.
pub const DEFAULT_MIN_RADIUS: f64 = 50.0;
/// Absolute floor for the circle's upper radius bound.
pub const RADIUS_FLOOR: f64 = 10.0;
/// Gap kept between the largest circle and the image edge.
pub const RADIUS_EDGE_GAP: f64 = 2.0;
/// Default square output size for circle exports.
pub const DEFAULT_OUTPUT_SIZE: u32 = 256;

/// Which selection variant the editor runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CropShape {
    /// Aspect-locked rectangle, exported at native resolution.
    Rect {
        #[serde(default = "default_aspect")]
        aspect: f64,
    },
    /// Circle, exported as a fixed-size square (avatars).
    Circle {
        #[serde(default = "default_output_size")]
        output_size: u32,
    },
}

impl Default for CropShape {
    fn default() -> Self {
        CropShape::Rect { aspect: default_aspect() }
    }
}

fn default_aspect() -> f64 {
    1.0
}

fn default_output_size() -> u32 {
    DEFAULT_OUTPUT_SIZE
}

/// Resampling filter used when the export has to scale pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    /// Nearest neighbor (blocky, fastest).
    Nearest,
    /// Bilinear (smooth, fast).
    Bilinear,
    /// Lanczos3 (smoothest).
    #[default]
    Lanczos3,
}

impl ResampleFilter {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResampleFilter::Nearest => image::imageops::FilterType::Nearest,
            ResampleFilter::Bilinear => image::imageops::FilterType::Triangle,
            ResampleFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Tunables for one crop editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Selection variant and its export parameter.
    pub shape: CropShape,
    /// Minimum rectangle width in display pixels.
    pub min_crop_size: f64,
    /// Minimum circle radius in display pixels.
    pub min_radius: f64,
    /// Fraction of the image a fresh rectangle covers (0.72).
    pub initial_fill: f64,
    /// Fraction of the shorter image side used as the initial radius (0.28).
    pub circle_fill: f64,
    /// Fraction of the largest fitting width used as a resize floor (0.12).
    pub min_fill_fraction: f64,
    /// Distance from a corner within which a press grabs the resize handle.
    pub handle_hit_radius: f64,
    /// Filter used when the export resamples.
    pub filter: ResampleFilter,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            shape: CropShape::default(),
            min_crop_size: DEFAULT_MIN_CROP_SIZE,
            min_radius: DEFAULT_MIN_RADIUS,
            initial_fill: 0.72,
            circle_fill: 0.28,
            min_fill_fraction: 0.12,
            handle_hit_radius: 14.0,
            filter: ResampleFilter::default(),
        }
    }
}

impl CropConfig {
    /// Rectangle config with the given aspect ratio (width / height).
    pub fn rect(aspect: f64) -> Self {
        Self {
            shape: CropShape::Rect { aspect },
            ..Self::default()
        }
    }

    /// Circle config exporting `output_size` x `output_size` pixels.
    pub fn circle(output_size: u32) -> Self {
        Self {
            shape: CropShape::Circle { output_size },
            ..Self::default()
        }
    }

    /// Return a copy with every value forced into its usable range.
    ///
    /// - Non-positive or non-finite aspect falls back to 1
    /// - Zero output size becomes 1
    /// - Fractions are clamped into (0, 1]
    /// - Negative minimums become 0
    pub fn validated(&self) -> Self {
        let defaults = Self::default();
        let shape = match self.shape {
            CropShape::Rect { aspect } => CropShape::Rect {
                aspect: sanitize_aspect(aspect),
            },
            CropShape::Circle { output_size } => CropShape::Circle {
                output_size: output_size.max(1),
            },
        };

        Self {
            shape,
            min_crop_size: non_negative(self.min_crop_size, defaults.min_crop_size),
            min_radius: non_negative(self.min_radius, defaults.min_radius),
            initial_fill: fraction(self.initial_fill, defaults.initial_fill),
            circle_fill: fraction(self.circle_fill, defaults.circle_fill),
            min_fill_fraction: fraction(self.min_fill_fraction, defaults.min_fill_fraction),
            handle_hit_radius: non_negative(self.handle_hit_radius, defaults.handle_hit_radius),
            filter: self.filter,
        }
    }

    /// Aspect ratio of the rectangle variant (1 for circles).
    pub fn aspect(&self) -> f64 {
        match self.shape {
            CropShape::Rect { aspect } => sanitize_aspect(aspect),
            CropShape::Circle { .. } => 1.0,
        }
    }

    pub fn is_circle(&self) -> bool {
        matches!(self.shape, CropShape::Circle { .. })
    }
}

/// Non-positive and non-finite ratios fall back to a square.
pub fn sanitize_aspect(aspect: f64) -> f64 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}

fn non_negative(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        fallback
    }
}

fn fraction(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value.min(1.0)
    } else {
        fallback
    }
}
