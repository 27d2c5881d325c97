use std::sync::Arc;

use crate::image::{ImageSurface, PixelBuffer};

use super::CameraFacing;

/// One captured frame as delivered by the capture collaborator.
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub pixels: Arc<PixelBuffer>,
    pub facing: CameraFacing,
    /// Monotonic capture counter, used for diagnostics only.
    pub sequence: u64,
}

impl CameraFrame {
    pub fn new(pixels: Arc<PixelBuffer>, facing: CameraFacing, sequence: u64) -> Self {
        Self {
            pixels,
            facing,
            sequence,
        }
    }

    /// The frame as captured, in sensor orientation.
    pub fn image(&self) -> ImageSurface {
        ImageSurface::from_pixels(self.pixels.clone())
    }

    /// The frame with the facing's orientation transform applied.
    pub fn oriented_image(&self) -> ImageSurface {
        self.image().transformed(self.facing.orientation_transform())
    }
}
