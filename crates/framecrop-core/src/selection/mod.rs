//! Selection model shared by the two crop variants.
//!
//! - [`rect`]: aspect-locked rectangle in image-layout-local coordinates
//! - [`circle`]: circle in container-local coordinates
//!
//! Both variants consume the same [`ImageLayout`](crate::layout::ImageLayout)
//! and only differ in their resolvers; there is no shared trait because the
//! session dispatches on [`Selection`] directly.

pub mod circle;
pub mod rect;

use serde::{Deserialize, Serialize};

pub use circle::CircleSelection;
pub use rect::CropRect;

/// Resize handle position on the rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corner {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::Nw, Corner::Ne, Corner::Sw, Corner::Se];

    /// Direction the dragged corner moves away from the anchor, per axis.
    ///
    /// `+1.0` means the dragged corner lies right of (or below) the anchor.
    #[inline]
    pub fn signs(self) -> (f64, f64) {
        match self {
            Corner::Nw => (-1.0, -1.0),
            Corner::Ne => (1.0, -1.0),
            Corner::Sw => (-1.0, 1.0),
            Corner::Se => (1.0, 1.0),
        }
    }

    /// Parse a handle name as sent by the host ("nw", "ne", "sw", "se").
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "nw" => Some(Corner::Nw),
            "ne" => Some(Corner::Ne),
            "sw" => Some(Corner::Sw),
            "se" => Some(Corner::Se),
            _ => None,
        }
    }
}

/// The one live selection of a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    Rect(CropRect),
    Circle(CircleSelection),
}

impl Selection {
    pub fn as_rect(&self) -> Option<&CropRect> {
        match self {
            Selection::Rect(rect) => Some(rect),
            Selection::Circle(_) => None,
        }
    }

    pub fn as_circle(&self) -> Option<&CircleSelection> {
        match self {
            Selection::Circle(circle) => Some(circle),
            Selection::Rect(_) => None,
        }
    }
}

/// What a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "corner", rename_all = "snake_case")]
pub enum HitTarget {
    /// Inside the selection: starts a move.
    Body,
    /// On a resize handle: starts a resize from that corner.
    Handle(Corner),
}

/// Clamp `value` into `[min, max]`.
///
/// When the range is empty (`max < min`, i.e. the selection is larger than
/// the space on this axis) the midpoint is returned, so the selection stays
/// centered rather than pinned to one edge.
#[inline]
pub(crate) fn clamp_axis(value: f64, min: f64, max: f64) -> f64 {
    if max < min {
        (min + max) / 2.0
    } else {
        value.max(min).min(max)
    }
}
