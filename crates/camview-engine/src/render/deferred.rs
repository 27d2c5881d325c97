use crate::coords::{Affine, ColorRgba, PixelSize};
use crate::image::ImageSurface;

use super::{
    BackendCaps, BackendKind, ColorSpace, Compositor, ContentMode, RenderBackend, RenderOutcome,
    RenderSchedule, SkipReason,
};

/// Tile-based / deferred backend.
///
/// Always fits: the image extent is moved to the origin and scaled by
/// `min(dw / ew, dh / eh)`, then the whole drawable is rendered from image
/// space. The result is anchored at the drawable origin rather than centered.
/// The drawable is cleared to the background color first.
pub struct DeferredBackend<C> {
    compositor: C,
    warned_mode: bool,
}

impl<C: Compositor> DeferredBackend<C> {
    pub fn new(compositor: C) -> Self {
        Self {
            compositor,
            warned_mode: false,
        }
    }
}

impl<C: Compositor> RenderBackend for DeferredBackend<C> {
    fn kind(&self) -> BackendKind {
        BackendKind::Deferred
    }

    fn capabilities(&self) -> BackendCaps {
        BackendCaps {
            content_modes: &[ContentMode::Fit],
            schedule: RenderSchedule::OnSet,
        }
    }

    fn drawable_size(&self) -> PixelSize {
        self.compositor.drawable_size()
    }

    fn resize(&mut self, size: PixelSize) {
        self.compositor.resize(size);
    }

    fn render(
        &mut self,
        image: Option<&ImageSurface>,
        mode: ContentMode,
        background: ColorRgba,
    ) -> RenderOutcome {
        if mode != ContentMode::Fit && !self.warned_mode {
            log::debug!("deferred backend renders Fit only; {mode:?} ignored");
            self.warned_mode = true;
        }

        let Some(image) = image else {
            return RenderOutcome::Skipped(SkipReason::NoImage);
        };

        let extent = image.extent();
        if extent.is_empty() || !extent.is_finite() {
            return RenderOutcome::Skipped(SkipReason::EmptyExtent);
        }

        let Some(size) = self.compositor.begin_pass(Some(background)) else {
            return RenderOutcome::Skipped(SkipReason::NoDrawable);
        };

        let bounds = size.bounds();
        let scale = (bounds.width() / extent.width()).min(bounds.height() / extent.height());

        let scaled = image
            .transformed(Affine::translation(-extent.origin.x, -extent.origin.y))
            .transformed(Affine::scaling(scale, scale));

        self.compositor
            .draw_image(&scaled, bounds, bounds, ColorSpace::Srgb);
        self.compositor.present();

        RenderOutcome::Presented {
            target: scaled.extent(),
        }
    }
}
