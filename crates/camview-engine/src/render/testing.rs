//! Recording compositor for backend and view tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::coords::{ColorRgba, PixelSize, Rect};
use crate::image::{ImageSource, ImageSurface};

use super::{ColorSpace, Compositor};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Drawn {
    Solid(ColorRgba),
    Pixels { width: u32, height: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Op {
    Begin { clear: Option<ColorRgba> },
    Draw {
        drawn: Drawn,
        extent: Rect,
        in_rect: Rect,
        from_rect: Rect,
        color_space: ColorSpace,
    },
    Present,
}

/// Records every call; the log is shared so it stays readable after the
/// compositor is moved into a backend.
pub(crate) struct RecordingCompositor {
    size: PixelSize,
    pub(crate) drawable_available: bool,
    log: Rc<RefCell<Vec<Op>>>,
}

impl RecordingCompositor {
    pub(crate) fn new(width: u32, height: u32) -> (Self, Rc<RefCell<Vec<Op>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let compositor = Self {
            size: PixelSize::new(width, height),
            drawable_available: true,
            log: log.clone(),
        };
        (compositor, log)
    }

    pub(crate) fn without_drawable(mut self) -> Self {
        self.drawable_available = false;
        self
    }
}

impl Compositor for RecordingCompositor {
    fn drawable_size(&self) -> PixelSize {
        self.size
    }

    fn resize(&mut self, size: PixelSize) {
        self.size = size;
    }

    fn begin_pass(&mut self, clear: Option<ColorRgba>) -> Option<PixelSize> {
        if !self.drawable_available || self.size.is_empty() {
            return None;
        }
        self.log.borrow_mut().push(Op::Begin { clear });
        Some(self.size)
    }

    fn draw_image(
        &mut self,
        image: &ImageSurface,
        in_rect: Rect,
        from_rect: Rect,
        color_space: ColorSpace,
    ) {
        let drawn = match image.source() {
            ImageSource::Solid(color) => Drawn::Solid(*color),
            ImageSource::Pixels(px) => Drawn::Pixels {
                width: px.width(),
                height: px.height(),
            },
        };
        self.log.borrow_mut().push(Op::Draw {
            drawn,
            extent: image.extent(),
            in_rect,
            from_rect,
            color_space,
        });
    }

    fn present(&mut self) {
        self.log.borrow_mut().push(Op::Present);
    }
}

/// Pixel-backed test image of the given size.
pub(crate) fn test_image(width: u32, height: u32) -> ImageSurface {
    use crate::image::{PixelBuffer, PixelFormat};
    use std::sync::Arc;

    let data = vec![0u8; (width * height * 4) as usize];
    let pixels = PixelBuffer::new(width, height, PixelFormat::Rgba8, data)
        .expect("test image dimensions are valid");
    ImageSurface::from_pixels(Arc::new(pixels))
}
