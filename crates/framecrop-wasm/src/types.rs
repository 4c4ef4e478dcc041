//! JavaScript-facing data shapes for the crop editor.
//!
//! Everything here crosses the boundary through `serde_wasm_bindgen`, so the
//! structs are plain serde types and can be unit tested on native targets.

use framecrop_core::{CropSession, Corner, HitTarget, ImageLayout, Phase, Selection, Size};
use serde::{Deserialize, Serialize};

/// Snapshot of the editor, returned by `CropEditor.state()`.
///
/// `selection` is in the variant's native space (image-local for rectangles,
/// container-local for circles); `display_selection` is always
/// container-local, ready for positioning the overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorState {
    pub phase: Phase,
    pub dragging: bool,
    pub saving: bool,
    pub layout: Option<ImageLayout>,
    pub natural: Option<Size>,
    pub selection: Option<Selection>,
    pub display_selection: Option<Selection>,
}

impl EditorState {
    pub(crate) fn capture(session: &CropSession) -> Self {
        Self {
            phase: session.phase(),
            dragging: session.is_dragging(),
            saving: session.is_saving(),
            layout: session.layout(),
            natural: session.natural_size(),
            selection: session.selection(),
            display_selection: session.display_selection(),
        }
    }
}

/// Phase name as exposed to JavaScript.
pub(crate) fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::LayoutReady => "layout_ready",
        Phase::Dragging => "dragging",
    }
}

/// Parse a drag target sent by the host: `"body"` or a corner name.
pub(crate) fn parse_target(name: &str) -> Option<HitTarget> {
    if name.eq_ignore_ascii_case("body") {
        Some(HitTarget::Body)
    } else {
        Corner::from_name(name).map(HitTarget::Handle)
    }
}
