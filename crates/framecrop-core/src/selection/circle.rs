//! Circular selection for fixed-size (avatar) crops.
//!
//! Unlike the rectangle, a [`CircleSelection`] is stored in container-local
//! coordinates, so the image layout's `x`/`y` offset is part of every bound.

use serde::{Deserialize, Serialize};

use super::{clamp_axis, HitTarget};
use crate::config::{CropConfig, RADIUS_EDGE_GAP, RADIUS_FLOOR};
use crate::layout::{ImageLayout, Point};

/// Circle selection in container-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CircleSelection {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl CircleSelection {
    pub fn new(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self { center_x, center_y, radius }
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    pub fn contains(&self, point: Point) -> bool {
        (point.x - self.center_x).hypot(point.y - self.center_y) <= self.radius
    }
}

/// Allowed radius range `(min, max)` for a layout.
///
/// `max = max(10, min(w, h) / 2 - 2)`. The configured minimum is lowered to
/// `max` when the image is too small for it, so the upper bound wins when
/// space is scarce.
pub fn radius_bounds(layout: &ImageLayout, config: &CropConfig) -> (f64, f64) {
    let max = RADIUS_FLOOR.max(layout.min_dimension() / 2.0 - RADIUS_EDGE_GAP);
    let min = config.min_radius.min(max);
    (min, max)
}

fn clamp_center(center_x: f64, center_y: f64, radius: f64, layout: &ImageLayout) -> (f64, f64) {
    (
        clamp_axis(center_x, layout.x + radius, layout.x + layout.width - radius),
        clamp_axis(center_y, layout.y + radius, layout.y + layout.height - radius),
    )
}

/// Circle centered on the image, radius 28% of its shorter side.
pub fn initial_circle(layout: &ImageLayout, config: &CropConfig) -> CircleSelection {
    let (min, max) = radius_bounds(layout, config);
    let radius = (layout.min_dimension() * config.circle_fill).max(min).min(max);
    let center = layout.center();

    CircleSelection::new(center.x, center.y, radius)
}

/// Translate the circle by the pointer delta, keeping it inside the image.
pub fn move_circle(
    start: &CircleSelection,
    start_pointer: Point,
    pointer: Point,
    layout: &ImageLayout,
) -> CircleSelection {
    let (center_x, center_y) = clamp_center(
        start.center_x + pointer.x - start_pointer.x,
        start.center_y + pointer.y - start_pointer.y,
        start.radius,
        layout,
    );

    CircleSelection::new(center_x, center_y, start.radius)
}

/// Remap the circle from `previous` layout to `next`.
///
/// The radius scales by `next.width / previous.width`; the center is scaled
/// relative to the layout origin so a changed letterbox offset does not shift
/// the framing. The result is clamped like a fresh circle.
pub fn rescale_circle(
    circle: &CircleSelection,
    previous: &ImageLayout,
    next: &ImageLayout,
    config: &CropConfig,
) -> CircleSelection {
    if !(previous.width > 0.0 && previous.width.is_finite()) {
        return initial_circle(next, config);
    }

    let scale = next.width / previous.width;
    let (min, max) = radius_bounds(next, config);
    let radius = (circle.radius * scale).max(min).min(max);

    let (center_x, center_y) = clamp_center(
        next.x + (circle.center_x - previous.x) * scale,
        next.y + (circle.center_y - previous.y) * scale,
        radius,
        next,
    );

    CircleSelection::new(center_x, center_y, radius)
}

/// Hit-test a press at `point` (container-local). Circles only move.
pub fn hit_test(circle: &CircleSelection, point: Point) -> Option<HitTarget> {
    circle.contains(point).then_some(HitTarget::Body)
}
