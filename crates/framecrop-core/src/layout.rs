//! Containment layout: fitting a natural-size image inside a container.
//!
//! The image is scaled uniformly until one axis exactly fills the container
//! and centered on the other axis (letterbox or pillarbox). The resulting
//! [`ImageLayout`] is expressed in container-local coordinates.

use serde::{Deserialize, Serialize};

/// Width and height of a container, an image, or a layout rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when both dimensions are finite and strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

/// A point in some 2D coordinate space (client, stage, or image-layout).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The rectangle the scaled image occupies inside its container.
///
/// `width / height` always equals the natural image aspect ratio, and the
/// non-letterboxed axis fills the container exactly.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ImageLayout {
    /// Top-left corner in container coordinates.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Center of the image in container coordinates.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Shorter of the two displayed dimensions.
    pub fn min_dimension(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// Fit `natural` inside `container`, preserving aspect ratio.
///
/// Returns `None` when either size has a zero, negative, or non-finite
/// dimension; callers treat that as "not ready" and keep no selection.
pub fn compute_image_layout(container: Size, natural: Size) -> Option<ImageLayout> {
    if !container.is_positive() || !natural.is_positive() {
        return None;
    }

    let container_aspect = container.aspect();
    let image_aspect = natural.aspect();

    let layout = if container_aspect > image_aspect {
        // Container is relatively wider: pillarbox
        let height = container.height;
        let width = height * image_aspect;
        ImageLayout {
            x: (container.width - width) / 2.0,
            y: 0.0,
            width,
            height,
        }
    } else {
        // Container is relatively taller (or equal): letterbox
        let width = container.width;
        let height = width / image_aspect;
        ImageLayout {
            x: 0.0,
            y: (container.height - height) / 2.0,
            width,
            height,
        }
    };

    Some(layout)
}
