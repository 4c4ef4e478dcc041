//! Framecrop WASM - WebAssembly bindings for Framecrop
//!
//! This crate exposes the framecrop-core crop session to JavaScript/TypeScript
//! as a single `CropEditor` class.
//!
//! # Module Structure
//!
//! - `editor` - The `CropEditor` class (events in, selection and PNG out)
//! - `types` - Serializable state snapshots and host string parsing
//!
//! # Usage
//!
//! ```typescript
//! import init, { CropEditor } from '@framecrop/wasm';
//!
//! await init();
//!
//! const editor = new CropEditor({ shape: { kind: 'circle', output_size: 256 } });
//! editor.load_image(new Uint8Array(await file.arrayBuffer()));
//! editor.set_container_size(480, 360);
//! const avatar = editor.export_data_url();
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod types;

pub use editor::CropEditor;
pub use types::EditorState;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
