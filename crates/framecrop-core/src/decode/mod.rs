//! Source image decoding.
//!
//! The crop editor works on one loaded image. Decoding turns the host's file
//! bytes (JPEG or PNG) into an upright RGB [`Raster`]; its dimensions are the
//! natural size the layout is computed from.
//!
//! EXIF orientation is applied during decoding, so a portrait phone photo
//! reports portrait natural dimensions and crops line up with what the user
//! sees on screen.

mod source;
mod types;

pub use source::{decode_image, read_orientation};
pub use types::{DecodeError, Raster};
