//! Coordinate and geometry types shared by the image core and the backends.
//!
//! Image space and drawable space are both y-up with the origin at the
//! bottom-left, matching the convention the content-fit and orientation math
//! is written against. The wgpu compositor converts to NDC (also y-up) and
//! flips only when computing framebuffer scissor rects.

mod affine;
mod color;
mod rect;
mod size;
mod vec2;

pub use affine::Affine;
pub use color::ColorRgba;
pub use rect::Rect;
pub use size::PixelSize;
pub use vec2::Vec2;
