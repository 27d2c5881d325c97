use crate::coords::{ColorRgba, PixelSize, Rect};
use crate::image::ImageSurface;

/// Color handling for a draw.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorSpace {
    /// Source values are sRGB-encoded and converted for the drawable.
    Srgb,
    /// No color management: values are written as sampled.
    Passthrough,
}

/// GPU backend collaborator: the primitives a render backend needs.
///
/// Coordinates are drawable pixels with the origin at the bottom-left.
pub trait Compositor {
    fn drawable_size(&self) -> PixelSize;

    fn resize(&mut self, size: PixelSize);

    /// Acquires the drawable for a new pass, optionally clearing it.
    ///
    /// Returns `None` when no drawable is available; the caller then skips the
    /// pass.
    fn begin_pass(&mut self, clear: Option<ColorRgba>) -> Option<PixelSize>;

    /// Samples the `from_rect` region of `image` (image space) into `in_rect`
    /// of the drawable.
    fn draw_image(
        &mut self,
        image: &ImageSurface,
        in_rect: Rect,
        from_rect: Rect,
        color_space: ColorSpace,
    );

    /// Submits the pass and presents the drawable.
    fn present(&mut self);
}
