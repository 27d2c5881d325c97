use crate::coords::{Affine, Vec2};
use crate::image::ImageSurface;

use super::{Filter, FilterConfig, FilterError};

/// Returns the image unchanged (shares the source).
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl Passthrough {
    pub const NAME: &'static str = "passthrough";
}

impl Filter for Passthrough {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, image: &ImageSurface, _config: &FilterConfig) -> Result<ImageSurface, FilterError> {
        Ok(image.clone())
    }
}

/// Geometric filter: scale, then rotate, then translate, appended to the
/// image's pending transform.
///
/// Parameters: `scale` (vector or scalar, default 1), `rotation` (radians,
/// counter-clockwise, default 0), `translation` (vector, default 0).
#[derive(Debug, Default, Clone, Copy)]
pub struct AffineFilter;

impl AffineFilter {
    pub const NAME: &'static str = "transform";

    pub fn transform_for(config: &FilterConfig) -> Result<Affine, FilterError> {
        let scale = config.vector_or("scale", Vec2::new(1.0, 1.0))?;
        let rotation = config.scalar_or("rotation", 0.0)?;
        let translation = config.vector_or("translation", Vec2::zero())?;

        Ok(Affine::scaling(scale.x, scale.y)
            .then(Affine::rotation(rotation))
            .then(Affine::translation(translation.x, translation.y)))
    }
}

impl Filter for AffineFilter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, image: &ImageSurface, config: &FilterConfig) -> Result<ImageSurface, FilterError> {
        let transform = Self::transform_for(config)?;
        if transform.invert().is_none() {
            return Err(FilterError::Degenerate {
                filter: config.name.clone(),
            });
        }
        Ok(image.transformed(transform))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::filter::FilterValue;
    use crate::render::testing::test_image;
    use core::f32::consts::FRAC_PI_2;

    #[test]
    fn passthrough_shares_pixels() {
        let img = test_image(8, 4);
        let out = Passthrough.apply(&img, &FilterConfig::new(Passthrough::NAME)).unwrap();
        assert!(out.shares_pixels_with(&img));
        assert_eq!(out.extent(), img.extent());
    }

    #[test]
    fn default_affine_is_identity() {
        let t = AffineFilter::transform_for(&FilterConfig::new(AffineFilter::NAME)).unwrap();
        assert!(t.is_identity());
    }

    #[test]
    fn scale_rotate_translate_order() {
        let cfg = FilterConfig::new(AffineFilter::NAME)
            .with("scale", FilterValue::Scalar(2.0))
            .with("rotation", FilterValue::Scalar(FRAC_PI_2))
            .with("translation", FilterValue::Vector(Vec2::new(100.0, 0.0)));

        let out = AffineFilter.apply(&test_image(10, 5), &cfg).unwrap();
        // 20x10 after scale, rotated CCW to (-10, 0, 10, 20), then shifted.
        assert_eq!(out.extent(), Rect::new(90.0, 0.0, 10.0, 20.0));
    }

    #[test]
    fn zero_scale_is_degenerate() {
        let cfg = FilterConfig::new(AffineFilter::NAME).with("scale", FilterValue::Scalar(0.0));
        assert_eq!(
            AffineFilter.apply(&test_image(4, 4), &cfg).unwrap_err(),
            FilterError::Degenerate { filter: "transform".into() }
        );
    }
}
