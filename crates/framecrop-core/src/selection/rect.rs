//! Aspect-locked rectangular selection.
//!
//! A [`CropRect`] lives in image-layout-local coordinates: `(0, 0)` is the
//! top-left corner of the displayed image, not of the container. Every
//! resolver here returns a rectangle that keeps `width / height == aspect`
//! and stays inside `[0, layout.width] x [0, layout.height]`.

use serde::{Deserialize, Serialize};

use super::{clamp_axis, Corner, HitTarget};
use crate::config::CropConfig;
use crate::layout::{ImageLayout, Point};

/// Rectangle selection in image-layout-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Position of a corner handle.
    pub fn corner_point(&self, corner: Corner) -> Point {
        match corner {
            Corner::Nw => Point::new(self.x, self.y),
            Corner::Ne => Point::new(self.right(), self.y),
            Corner::Sw => Point::new(self.x, self.bottom()),
            Corner::Se => Point::new(self.right(), self.bottom()),
        }
    }

    /// The corner that stays pinned while `corner` is dragged.
    pub fn anchor(&self, corner: Corner) -> Point {
        let opposite = match corner {
            Corner::Nw => Corner::Se,
            Corner::Ne => Corner::Sw,
            Corner::Sw => Corner::Ne,
            Corner::Se => Corner::Nw,
        };
        self.corner_point(opposite)
    }

    pub fn contains(&self, point: Point) -> bool {
        (self.x..=self.right()).contains(&point.x) && (self.y..=self.bottom()).contains(&point.y)
    }

    /// The same rectangle in container-local coordinates.
    pub fn to_container(&self, layout: &ImageLayout) -> CropRect {
        CropRect::new(self.x + layout.x, self.y + layout.y, self.width, self.height)
    }
}

/// Largest width that fits the layout at this aspect ratio.
fn max_fit_width(layout: &ImageLayout, aspect: f64) -> f64 {
    layout.width.min(layout.height * aspect).max(0.0)
}

/// Resize floor, never larger than what `max_width` allows.
fn min_crop_width(layout: &ImageLayout, aspect: f64, config: &CropConfig, max_width: f64) -> f64 {
    let floor = config
        .min_crop_size
        .max(max_fit_width(layout, aspect) * config.min_fill_fraction);
    max_width.min(floor)
}

/// Centered starting rectangle covering about 72% of the image.
///
/// The width is derived from the layout width first; if the resulting height
/// overflows 72% of the layout height, both are re-derived from the height.
pub fn initial_crop_rect(layout: &ImageLayout, config: &CropConfig) -> CropRect {
    let aspect = config.aspect();
    let fill = config.initial_fill;

    let mut width = layout.width * fill;
    let mut height = width / aspect;
    if height > layout.height * fill {
        height = layout.height * fill;
        width = height * aspect;
    }

    let max_width = max_fit_width(layout, aspect);
    let min_width = min_crop_width(layout, aspect, config, max_width);
    width = width.max(min_width).min(max_width);
    height = width / aspect;

    CropRect {
        x: (layout.width - width) / 2.0,
        y: (layout.height - height) / 2.0,
        width,
        height,
    }
}

/// Translate `start` by the pointer delta, clamped inside the layout.
///
/// Size never changes during a move.
pub fn move_crop_rect(
    start: &CropRect,
    start_pointer: Point,
    pointer: Point,
    layout: &ImageLayout,
) -> CropRect {
    let dx = pointer.x - start_pointer.x;
    let dy = pointer.y - start_pointer.y;

    CropRect {
        x: clamp_axis(start.x + dx, 0.0, layout.width - start.width),
        y: clamp_axis(start.y + dy, 0.0, layout.height - start.height),
        width: start.width,
        height: start.height,
    }
}

/// Resize `start` by dragging `corner` to `pointer` (image-layout-local).
///
/// # Algorithm
///
/// 1. The anchor is the corner opposite `corner` at drag start
/// 2. The pointer implies two candidate widths: its horizontal distance from
///    the anchor, and its vertical distance scaled by the aspect ratio
/// 3. `max_width` is the largest width reachable from the anchor without
///    leaving the layout on either axis
/// 4. `min_width` is `max(min_crop_size, 12% of the fitting width)`, capped
///    at `max_width`
/// 5. The tighter candidate is clamped into `[min_width, max_width]`
/// 6. The rectangle is rebuilt from the anchor, so the anchor stays fixed
pub fn resize_crop_rect(
    start: &CropRect,
    corner: Corner,
    pointer: Point,
    layout: &ImageLayout,
    config: &CropConfig,
) -> CropRect {
    let aspect = config.aspect();
    let anchor = start.anchor(corner);
    let (sign_x, sign_y) = corner.signs();

    let width_from_pointer = (pointer.x - anchor.x) * sign_x;
    let height_from_pointer = (pointer.y - anchor.y) * sign_y * aspect;

    let available_width = if sign_x > 0.0 {
        layout.width - anchor.x
    } else {
        anchor.x
    };
    let available_height = if sign_y > 0.0 {
        layout.height - anchor.y
    } else {
        anchor.y
    };
    let max_width = available_width.min(available_height * aspect).max(0.0);
    let min_width = min_crop_width(layout, aspect, config, max_width);

    let candidate = width_from_pointer.min(height_from_pointer);
    let width = candidate.max(min_width).min(max_width);
    let height = width / aspect;

    let x = if sign_x > 0.0 { anchor.x } else { anchor.x - width };
    let y = if sign_y > 0.0 { anchor.y } else { anchor.y - height };

    CropRect { x, y, width, height }
}

/// Remap `rect` from `previous` layout to `next`, preserving framing.
///
/// Every field is multiplied by `next.width / previous.width`, then the
/// width is clamped to the resize bounds and the origin back inside the
/// layout. A degenerate previous layout yields a fresh initial rectangle.
pub fn rescale_crop_rect(
    rect: &CropRect,
    previous: &ImageLayout,
    next: &ImageLayout,
    config: &CropConfig,
) -> CropRect {
    if !(previous.width > 0.0 && previous.width.is_finite()) {
        return initial_crop_rect(next, config);
    }

    let aspect = config.aspect();
    let scale = next.width / previous.width;

    let max_width = max_fit_width(next, aspect);
    let min_width = min_crop_width(next, aspect, config, max_width);
    let width = (rect.width * scale).max(min_width).min(max_width);
    let height = width / aspect;

    CropRect {
        x: clamp_axis(rect.x * scale, 0.0, next.width - width),
        y: clamp_axis(rect.y * scale, 0.0, next.height - height),
        width,
        height,
    }
}

/// Hit-test a press at `point` (image-layout-local).
///
/// Handles win over the body so a press near a corner always resizes.
pub fn hit_test(rect: &CropRect, point: Point, handle_radius: f64) -> Option<HitTarget> {
    let on_handle = Corner::ALL.into_iter().find(|&corner| {
        let handle = rect.corner_point(corner);
        (point.x - handle.x).hypot(point.y - handle.y) <= handle_radius
    });

    match on_handle {
        Some(corner) => Some(HitTarget::Handle(corner)),
        None if rect.contains(point) => Some(HitTarget::Body),
        None => None,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
