//! Pointer coordinate mapping.
//!
//! Pointer events arrive in client (viewport) coordinates. The two selection
//! variants store their geometry in different spaces, so there are two
//! mappings that differ only in the reference origin:
//!
//! - [`to_image_local`]: origin at the top-left of the displayed image.
//!   Used by the rectangle variant, whose `CropRect` is image-layout-local.
//! - [`to_stage_local`]: origin at the top-left of the stage (container).
//!   Used by the circle variant, whose `CircleSelection` is container-local.

use serde::{Deserialize, Serialize};

use crate::layout::{ImageLayout, Point};

/// Bounding rectangle of the interactive surface, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StageRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl StageRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
}

/// Client coordinates to container-local coordinates.
#[inline]
pub fn to_stage_local(client: Point, stage: &StageRect) -> Point {
    Point::new(client.x - stage.left, client.y - stage.top)
}

/// Client coordinates to image-layout-local coordinates.
#[inline]
pub fn to_image_local(client: Point, stage: &StageRect, layout: &ImageLayout) -> Point {
    let local = to_stage_local(client, stage);
    Point::new(local.x - layout.x, local.y - layout.y)
}
