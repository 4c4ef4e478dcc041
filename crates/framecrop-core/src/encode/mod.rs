//! Encoding export rasters for the host.
//!
//! Crops are encoded as PNG: lossless, so the exported pixels are exactly the
//! ones the rasterizer produced. The host usually wants a `data:` URL it can
//! drop straight into an `<img>` or upload form, see [`png_data_url`].

mod png;

pub use png::{encode_png, png_data_url, EncodeError, PNG_MIME};
