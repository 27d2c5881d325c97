//! Immutable image descriptions.
//!
//! An [`ImageSurface`] never owns a unique mutable buffer: pixel data lives in a
//! shared [`PixelBuffer`], and geometric operations only compose a pending
//! transform that the compositor applies when a render pass samples the image.

mod error;
mod pixels;
mod surface;

pub use error::ImageError;
pub use pixels::{PixelBuffer, PixelFormat};
pub use surface::{ImageSource, ImageSurface};
