use std::sync::Arc;

use crate::coords::{Affine, ColorRgba, Rect};

use super::PixelBuffer;

/// What an [`ImageSurface`] samples from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Shared pixel data. Its untransformed extent is `(0, 0, width, height)`,
    /// with the first row at the top (largest y).
    Pixels(Arc<PixelBuffer>),

    /// A constant color over the surface's extent.
    Solid(ColorRgba),
}

/// Immutable image description: a source, a pending transform and the extent
/// that transform produces.
///
/// Cloning is cheap (pixel data is reference-counted). Transforming never
/// touches pixels; the compositor applies [`transform`](Self::transform) when
/// it samples the source.
#[derive(Debug, Clone)]
pub struct ImageSurface {
    source: ImageSource,
    transform: Affine,
    extent: Rect,
}

impl ImageSurface {
    /// Wraps a pixel buffer without copying it.
    pub fn from_pixels(pixels: Arc<PixelBuffer>) -> Self {
        let extent = Rect::new(0.0, 0.0, pixels.width() as f32, pixels.height() as f32);
        Self {
            source: ImageSource::Pixels(pixels),
            transform: Affine::IDENTITY,
            extent,
        }
    }

    /// A constant-color surface covering `extent`.
    pub fn solid(color: ColorRgba, extent: Rect) -> Self {
        Self {
            source: ImageSource::Solid(color),
            transform: Affine::IDENTITY,
            extent,
        }
    }

    /// Returns a surface with `transform` appended to the pending transform.
    ///
    /// The new extent is the bounding box of the current extent under
    /// `transform`; the source is shared with `self`.
    pub fn transformed(&self, transform: Affine) -> ImageSurface {
        ImageSurface {
            source: self.source.clone(),
            transform: self.transform.then(transform),
            extent: transform.apply_rect(self.extent),
        }
    }

    #[inline]
    pub fn extent(&self) -> Rect {
        self.extent
    }

    /// Transform from the source's own space into this surface's image space.
    #[inline]
    pub fn transform(&self) -> Affine {
        self.transform
    }

    #[inline]
    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    /// True when both surfaces sample the same pixel buffer allocation.
    pub fn shares_pixels_with(&self, other: &ImageSurface) -> bool {
        match (&self.source, &other.source) {
            (ImageSource::Pixels(a), ImageSource::Pixels(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Arc<PixelBuffer>> for ImageSurface {
    fn from(pixels: Arc<PixelBuffer>) -> Self {
        Self::from_pixels(pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::image::PixelFormat;
    use core::f32::consts::FRAC_PI_2;

    fn pixels(w: u32, h: u32) -> Arc<PixelBuffer> {
        let data = vec![0u8; (w * h * 4) as usize];
        Arc::new(PixelBuffer::new(w, h, PixelFormat::Rgba8, data).unwrap())
    }

    #[test]
    fn from_pixels_extent_is_origin_anchored() {
        let img = ImageSurface::from_pixels(pixels(64, 48));
        assert_eq!(img.extent(), Rect::new(0.0, 0.0, 64.0, 48.0));
        assert!(img.transform().is_identity());
    }

    #[test]
    fn transformed_moves_extent_not_pixels() {
        let img = ImageSurface::from_pixels(pixels(64, 48));
        let moved = img.transformed(Affine::translation(-10.0, 5.0));

        assert_eq!(moved.extent(), Rect::new(-10.0, 5.0, 64.0, 48.0));
        assert_eq!(img.extent(), Rect::new(0.0, 0.0, 64.0, 48.0));
        assert!(moved.shares_pixels_with(&img));
    }

    #[test]
    fn transforms_accumulate_in_order() {
        let img = ImageSurface::from_pixels(pixels(20, 10))
            .transformed(Affine::translation(5.0, 0.0))
            .transformed(Affine::scaling(2.0, 2.0));

        assert_eq!(img.extent(), Rect::new(10.0, 0.0, 40.0, 20.0));
        assert_eq!(img.transform().apply(Vec2::new(0.0, 0.0)), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn rotated_extent_swaps_axes() {
        let img = ImageSurface::from_pixels(pixels(1920, 1080))
            .transformed(Affine::rotation(-FRAC_PI_2));
        assert_eq!(img.extent(), Rect::new(0.0, -1920.0, 1080.0, 1920.0));
    }

    #[test]
    fn many_surfaces_derive_from_one_buffer() {
        let buf = pixels(8, 8);
        let a = ImageSurface::from_pixels(buf.clone()).transformed(Affine::scaling(2.0, 2.0));
        let b = ImageSurface::from_pixels(buf.clone()).transformed(Affine::rotation(1.0));
        assert!(a.shares_pixels_with(&b));
        assert_eq!(Arc::strong_count(&buf), 3);
    }

    #[test]
    fn solid_never_shares_pixels() {
        let extent = Rect::new(0.0, 0.0, 10.0, 10.0);
        let bg = ImageSurface::solid(ColorRgba::white(), extent);
        assert!(!bg.shares_pixels_with(&bg.clone()));
        assert_eq!(bg.transformed(Affine::scaling(3.0, 1.0)).extent(), Rect::new(0.0, 0.0, 30.0, 10.0));
    }
}
