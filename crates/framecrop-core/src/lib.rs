//! Framecrop Core - Crop geometry engine
//!
//! This crate provides the platform-independent half of Framecrop: fitting an
//! image into its container, the aspect-locked rectangle and avatar circle
//! selections, the drag state machine, and rasterizing the chosen region back
//! out of the source pixels as PNG.
//!
//! All geometry is plain `f64` arithmetic with no I/O, so everything except
//! [`decode`] and [`encode`] is deterministic and testable without a browser.

pub mod config;
pub mod decode;
pub mod encode;
pub mod export;
pub mod layout;
pub mod mapper;
pub mod selection;
pub mod session;

pub use config::{CropConfig, CropShape, ResampleFilter};
pub use decode::{decode_image, DecodeError, Raster};
pub use encode::{encode_png, png_data_url, EncodeError};
pub use export::{export_selection, ExportError, ExportedCrop, PixelRegion, SourceRegion};
pub use layout::{compute_image_layout, ImageLayout, Point, Size};
pub use mapper::{to_image_local, to_stage_local, StageRect};
pub use selection::{CircleSelection, Corner, CropRect, HitTarget, Selection};
pub use session::{CropSession, InteractionState, Key, Phase, SessionOutcome};
