use crate::coords::{ColorRgba, PixelSize};
use crate::image::ImageSurface;
use crate::render::{BackendKind, ContentMode, RenderBackend, RenderOutcome, RenderSchedule};

/// Construction-time view settings.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Requested content mode; `None` picks the backend's default.
    pub content_mode: Option<ContentMode>,
    pub background: ColorRgba,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            content_mode: None,
            background: ColorRgba::white(),
        }
    }
}

/// What the view renders. Content mode and background are fixed once the
/// view exists; the image is last-write-wins.
#[derive(Debug, Clone)]
pub struct DisplayState {
    image: Option<ImageSurface>,
    content_mode: ContentMode,
    background: ColorRgba,
}

impl DisplayState {
    pub fn image(&self) -> Option<&ImageSurface> {
        self.image.as_ref()
    }

    pub fn content_mode(&self) -> ContentMode {
        self.content_mode
    }

    pub fn background(&self) -> ColorRgba {
        self.background
    }
}

/// A drawable that shows the most recently set image.
///
/// All mutation goes through `&mut self`, so the image a render pass reads
/// can never be swapped out underneath it. Cross-thread producers hand frames
/// over through a [`FrameMailbox`](super::FrameMailbox) instead.
pub struct ImageView<'a> {
    backend: Box<dyn RenderBackend + 'a>,
    state: DisplayState,
    needs_display: bool,
}

impl<'a> ImageView<'a> {
    pub fn new(backend: Box<dyn RenderBackend + 'a>, config: ViewConfig) -> Self {
        let caps = backend.capabilities();
        let content_mode = match config.content_mode {
            Some(mode) if caps.supports(mode) => mode,
            Some(mode) => {
                let fallback = caps.default_mode();
                log::warn!(
                    "{} backend does not support {mode:?}; using {fallback:?}",
                    backend.kind()
                );
                fallback
            }
            None => caps.default_mode(),
        };

        log::debug!(
            "image view: {} backend, {content_mode:?}, schedule {:?}",
            backend.kind(),
            caps.schedule
        );

        Self {
            backend,
            state: DisplayState {
                image: None,
                content_mode,
                background: config.background,
            },
            needs_display: false,
        }
    }

    /// Replaces the current image.
    ///
    /// Backends that render on set do so before this returns and the outcome
    /// is handed back; others are marked dirty and render on the next
    /// [`on_redraw`](Self::on_redraw).
    pub fn set_image(&mut self, image: ImageSurface) -> Option<RenderOutcome> {
        self.state.image = Some(image);

        match self.backend.capabilities().schedule {
            RenderSchedule::OnSet => Some(self.render()),
            RenderSchedule::NextCycle => {
                self.needs_display = true;
                None
            }
        }
    }

    /// Applies a new drawable size. Never renders.
    ///
    /// Redraw-cycle backends holding an image are marked dirty; render-on-set
    /// backends show the new size with the next [`set_image`](Self::set_image).
    pub fn layout(&mut self, size: PixelSize) {
        if self.backend.drawable_size() == size {
            return;
        }
        log::debug!("image view layout {}x{}", size.width, size.height);
        self.backend.resize(size);

        if self.backend.capabilities().schedule == RenderSchedule::NextCycle
            && self.state.image().is_some()
        {
            self.needs_display = true;
        }
    }

    /// Redraw callback from the window system.
    ///
    /// Renders the current state for redraw-cycle backends and clears the
    /// dirty flag. Render-on-set backends ignore it.
    pub fn on_redraw(&mut self) -> Option<RenderOutcome> {
        match self.backend.capabilities().schedule {
            RenderSchedule::OnSet => None,
            RenderSchedule::NextCycle => {
                self.needs_display = false;
                Some(self.render())
            }
        }
    }

    fn render(&mut self) -> RenderOutcome {
        let outcome = self.backend.render(
            self.state.image.as_ref(),
            self.state.content_mode,
            self.state.background,
        );
        if let RenderOutcome::Skipped(reason) = outcome {
            log::trace!("render skipped: {reason:?}");
        }
        outcome
    }

    pub fn image(&self) -> Option<&ImageSurface> {
        self.state.image()
    }

    pub fn content_mode(&self) -> ContentMode {
        self.state.content_mode()
    }

    pub fn background(&self) -> ColorRgba {
        self.state.background()
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    pub fn drawable_size(&self) -> PixelSize {
        self.backend.drawable_size()
    }

    pub fn needs_display(&self) -> bool {
        self.needs_display
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::coords::Rect;
    use crate::render::testing::{test_image, Drawn, Op, RecordingCompositor};
    use crate::render::{DeferredBackend, ImmediateBackend, SkipReason};

    fn deferred(w: u32, h: u32, config: ViewConfig) -> (ImageView<'static>, Rc<RefCell<Vec<Op>>>) {
        let (compositor, log) = RecordingCompositor::new(w, h);
        (ImageView::new(Box::new(DeferredBackend::new(compositor)), config), log)
    }

    fn immediate(w: u32, h: u32, config: ViewConfig) -> (ImageView<'static>, Rc<RefCell<Vec<Op>>>) {
        let (compositor, log) = RecordingCompositor::new(w, h);
        (ImageView::new(Box::new(ImmediateBackend::new(compositor)), config), log)
    }

    fn presents(log: &Rc<RefCell<Vec<Op>>>) -> usize {
        log.borrow().iter().filter(|op| **op == Op::Present).count()
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn defaults_follow_backend() {
        let (view, _) = deferred(10, 10, ViewConfig::default());
        assert_eq!(view.content_mode(), ContentMode::Fit);
        assert_eq!(view.background(), ColorRgba::white());
        assert!(view.image().is_none());

        let (view, _) = immediate(10, 10, ViewConfig::default());
        assert_eq!(view.content_mode(), ContentMode::Fill);
        assert_eq!(view.backend_kind(), BackendKind::Immediate);
    }

    #[test]
    fn unsupported_mode_falls_back() {
        let config = ViewConfig {
            content_mode: Some(ContentMode::Fill),
            ..ViewConfig::default()
        };
        let (view, _) = deferred(10, 10, config);
        assert_eq!(view.content_mode(), ContentMode::Fit);
    }

    // ── deferred: render on set ───────────────────────────────────────────

    #[test]
    fn deferred_renders_on_set() {
        let (mut view, log) = deferred(400, 400, ViewConfig::default());

        let outcome = view.set_image(test_image(200, 100));

        assert_eq!(
            outcome,
            Some(RenderOutcome::Presented { target: Rect::new(0.0, 0.0, 400.0, 200.0) })
        );
        assert_eq!(presents(&log), 1);
        assert!(!view.needs_display());
        assert_eq!(view.on_redraw(), None);
        assert_eq!(presents(&log), 1);
    }

    #[test]
    fn latest_image_wins() {
        let (mut view, log) = deferred(100, 100, ViewConfig::default());
        view.set_image(test_image(10, 10));
        view.set_image(test_image(30, 20));

        let image = view.image().unwrap();
        assert_eq!(image.extent(), Rect::new(0.0, 0.0, 30.0, 20.0));

        let last_draw = log.borrow().iter().rev().find_map(|op| match op {
            Op::Draw { drawn, .. } => Some(drawn.clone()),
            _ => None,
        });
        assert_eq!(last_draw, Some(Drawn::Pixels { width: 30, height: 20 }));
    }

    #[test]
    fn background_reaches_clear() {
        let bg = ColorRgba::new(0.0, 0.0, 0.0, 1.0);
        let config = ViewConfig { background: bg, ..ViewConfig::default() };
        let (mut view, log) = deferred(10, 10, config);
        view.set_image(test_image(10, 10));
        assert_eq!(log.borrow()[0], Op::Begin { clear: Some(bg) });
    }

    // ── immediate: render next cycle ──────────────────────────────────────

    #[test]
    fn immediate_defers_to_redraw() {
        let (mut view, log) = immediate(400, 400, ViewConfig::default());

        assert_eq!(view.set_image(test_image(1920, 1080)), None);
        assert!(view.needs_display());
        assert_eq!(presents(&log), 0);

        let outcome = view.on_redraw().unwrap();
        assert!(outcome.is_presented());
        assert!(!view.needs_display());
        assert_eq!(presents(&log), 1);
    }

    #[test]
    fn redraw_without_image_skips() {
        let (mut view, log) = immediate(400, 400, ViewConfig::default());
        assert_eq!(view.on_redraw(), Some(RenderOutcome::Skipped(SkipReason::NoImage)));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn several_sets_render_latest_once() {
        let (mut view, log) = immediate(100, 100, ViewConfig::default());
        view.set_image(test_image(10, 10));
        view.set_image(test_image(30, 20));
        assert!(log.borrow().is_empty());

        view.on_redraw();

        let drawn: Vec<Drawn> = log
            .borrow()
            .iter()
            .filter_map(|op| match op {
                Op::Draw { drawn: drawn @ Drawn::Pixels { .. }, .. } => Some(drawn.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(drawn, vec![Drawn::Pixels { width: 30, height: 20 }]);
        assert_eq!(presents(&log), 1);
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn layout_resizes_without_rendering() {
        let (mut view, log) = deferred(100, 100, ViewConfig::default());
        view.layout(PixelSize::new(640, 480));
        assert_eq!(view.drawable_size(), PixelSize::new(640, 480));
        assert!(log.borrow().is_empty());

        let outcome = view.set_image(test_image(320, 240));
        assert_eq!(
            outcome,
            Some(RenderOutcome::Presented { target: Rect::new(0.0, 0.0, 640.0, 480.0) })
        );
    }

    #[test]
    fn layout_marks_immediate_dirty_only_with_image() {
        let (mut view, log) = immediate(100, 100, ViewConfig::default());
        view.layout(PixelSize::new(200, 100));
        assert!(!view.needs_display());

        view.set_image(test_image(10, 10));
        view.on_redraw();
        view.layout(PixelSize::new(300, 100));
        assert!(view.needs_display());
        assert_eq!(presents(&log), 1);

        let (mut view, _) = deferred(100, 100, ViewConfig::default());
        view.set_image(test_image(10, 10));
        view.layout(PixelSize::new(200, 100));
        assert!(!view.needs_display());
    }

    #[test]
    fn zero_size_drawable_skips() {
        let (mut view, _) = deferred(100, 100, ViewConfig::default());
        view.layout(PixelSize::new(0, 0));
        assert_eq!(
            view.set_image(test_image(4, 4)),
            Some(RenderOutcome::Skipped(SkipReason::NoDrawable))
        );
    }
}
