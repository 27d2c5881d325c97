use crate::coords::{ColorRgba, PixelSize};
use crate::image::ImageSurface;

use super::{
    BackendCaps, BackendKind, ColorSpace, Compositor, ContentMode, RenderBackend, RenderOutcome,
    RenderSchedule, SkipReason,
};

/// Immediate-mode backend.
///
/// Paints a full-drawable background surface, then draws the image into the
/// rectangle chosen by the content mode. Both draws use the drawable's native
/// color handling (no sRGB conversion). Renders on the view's redraw cycle.
pub struct ImmediateBackend<C> {
    compositor: C,
}

impl<C: Compositor> ImmediateBackend<C> {
    pub fn new(compositor: C) -> Self {
        Self { compositor }
    }
}

impl<C: Compositor> RenderBackend for ImmediateBackend<C> {
    fn kind(&self) -> BackendKind {
        BackendKind::Immediate
    }

    fn capabilities(&self) -> BackendCaps {
        BackendCaps {
            content_modes: &[ContentMode::Fill, ContentMode::Fit],
            schedule: RenderSchedule::NextCycle,
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
        let Some(image) = image else {
            return RenderOutcome::Skipped(SkipReason::NoImage);
        };

        let Some(size) = self.compositor.begin_pass(None) else {
            return RenderOutcome::Skipped(SkipReason::NoDrawable);
        };

        let bounds = size.bounds();
        let backdrop = ImageSurface::solid(background, bounds);
        self.compositor
            .draw_image(&backdrop, bounds, bounds, ColorSpace::Passthrough);

        let extent = image.extent();
        let target = mode.place(extent, bounds);
        if !target.is_empty() && target.is_finite() {
            self.compositor
                .draw_image(image, target, extent, ColorSpace::Passthrough);
        }

        self.compositor.present();
        RenderOutcome::Presented { target }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Affine, Rect};
    use crate::render::testing::{test_image, Drawn, Op, RecordingCompositor};

    const BG: ColorRgba = ColorRgba::new(1.0, 1.0, 1.0, 1.0);

    fn draws(log: &[Op]) -> Vec<(Drawn, Rect, Rect)> {
        log.iter()
            .filter_map(|op| match op {
                Op::Draw { drawn, in_rect, from_rect, .. } => {
                    Some((drawn.clone(), *in_rect, *from_rect))
                }
                _ => None,
            })
            .collect()
    }

    // ── content modes ─────────────────────────────────────────────────────

    #[test]
    fn fit_letterboxes_wide_image() {
        let (compositor, log) = RecordingCompositor::new(400, 400);
        let mut backend = ImmediateBackend::new(compositor);

        let outcome = backend.render(Some(&test_image(1920, 1080)), ContentMode::Fit, BG);
        let RenderOutcome::Presented { target } = outcome else {
            panic!("unexpected {outcome:?}");
        };
        assert!(target.approx_eq(Rect::new(0.0, 87.5, 400.0, 225.0), 1e-3));

        let bounds = Rect::new(0.0, 0.0, 400.0, 400.0);
        let log = log.borrow();
        assert_eq!(log.first(), Some(&Op::Begin { clear: None }));
        assert_eq!(log.last(), Some(&Op::Present));

        let drawn = draws(&log);
        assert_eq!(drawn.len(), 2);
        assert_eq!(drawn[0], (Drawn::Solid(BG), bounds, bounds));
        assert_eq!(drawn[1].0, Drawn::Pixels { width: 1920, height: 1080 });
        assert_eq!(drawn[1].1, target);
        assert_eq!(drawn[1].2, Rect::new(0.0, 0.0, 1920.0, 1080.0));
    }

    #[test]
    fn fill_crops_wide_image() {
        let (compositor, _log) = RecordingCompositor::new(400, 400);
        let mut backend = ImmediateBackend::new(compositor);

        let outcome = backend.render(Some(&test_image(1920, 1080)), ContentMode::Fill, BG);
        let RenderOutcome::Presented { target } = outcome else {
            panic!("unexpected {outcome:?}");
        };
        assert!((target.height() - 400.0).abs() < 1e-3);
        assert!((target.width() - 711.111).abs() < 1e-2);
        assert!((target.origin.x + 155.555).abs() < 1e-2);
        assert!(target.covers(Rect::new(0.0, 0.0, 400.0, 400.0), 1e-3));
    }

    #[test]
    fn fill_is_default_mode() {
        let (compositor, _log) = RecordingCompositor::new(1, 1);
        let backend = ImmediateBackend::new(compositor);
        let caps = backend.capabilities();
        assert_eq!(caps.default_mode(), ContentMode::Fill);
        assert!(caps.supports(ContentMode::Fit));
        assert_eq!(caps.schedule, RenderSchedule::NextCycle);
    }

    #[test]
    fn from_rect_is_transformed_extent() {
        let (compositor, log) = RecordingCompositor::new(1080, 1920);
        let mut backend = ImmediateBackend::new(compositor);

        let rotated = test_image(1920, 1080).transformed(Affine::rotation(-core::f32::consts::FRAC_PI_2));
        let outcome = backend.render(Some(&rotated), ContentMode::Fit, BG);

        assert_eq!(
            outcome,
            RenderOutcome::Presented { target: Rect::new(0.0, 0.0, 1080.0, 1920.0) }
        );
        let drawn = draws(&log.borrow());
        assert_eq!(drawn[1].2, Rect::new(0.0, -1920.0, 1080.0, 1920.0));
    }

    // ── skips ─────────────────────────────────────────────────────────────

    #[test]
    fn no_image_skips() {
        let (compositor, log) = RecordingCompositor::new(400, 400);
        let mut backend = ImmediateBackend::new(compositor);
        assert_eq!(
            backend.render(None, ContentMode::Fill, BG),
            RenderOutcome::Skipped(SkipReason::NoImage)
        );
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn no_drawable_skips() {
        let (compositor, _log) = RecordingCompositor::new(0, 0);
        let mut backend = ImmediateBackend::new(compositor);
        assert_eq!(
            backend.render(Some(&test_image(4, 4)), ContentMode::Fit, BG),
            RenderOutcome::Skipped(SkipReason::NoDrawable)
        );
    }

    #[test]
    fn degenerate_image_still_paints_background() {
        let (compositor, log) = RecordingCompositor::new(100, 50);
        let mut backend = ImmediateBackend::new(compositor);

        let flat = test_image(10, 10).transformed(Affine::scaling(0.0, 1.0));
        let outcome = backend.render(Some(&flat), ContentMode::Fit, BG);

        assert!(outcome.is_presented());
        let drawn = draws(&log.borrow());
        assert_eq!(drawn.len(), 1);
        assert_eq!(drawn[0].0, Drawn::Solid(BG));
    }
}
