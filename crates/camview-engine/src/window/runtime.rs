use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::PixelSize;
use crate::core::{App, AppControl, FrameWaker, RuntimeEvent};
use crate::device::{DeviceError, GpuInit};
use crate::render::{gpu, BackendKind, RenderOutcome};
use crate::time::RateMeter;
use crate::view::{ImageView, ViewConfig};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub backend: BackendKind,
    pub view: ViewConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "camview".to_string(),
            initial_size: LogicalSize::new(540.0, 960.0),
            backend: BackendKind::Deferred,
            view: ViewConfig::default(),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs the event loop until the window closes.
    ///
    /// Fails when the window or its view cannot be created; a missing GPU
    /// capability surfaces as a [`DeviceError::Unsupported`] inside the
    /// returned error.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::<RuntimeEvent>::with_user_event()
            .build()
            .context("failed to create winit EventLoop")?;

        let waker = FrameWaker::new(event_loop.create_proxy());
        let mut state = RuntimeState::new(config, gpu_init, app, waker);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    view: ImageView<'this>,
}

struct RuntimeState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    waker: Option<FrameWaker>,

    entry: Option<WindowEntry>,
    meter: RateMeter,
    failure: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<A> RuntimeState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A, waker: FrameWaker) -> Self {
        Self {
            config,
            gpu_init,
            app,
            waker: Some(waker),
            entry: None,
            meter: RateMeter::default(),
            failure: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        if !self.exit_requested {
            self.exit_requested = true;
            self.app.on_exit();
        }
        // Views own GPU resources borrowed from the window; release them first.
        self.entry = None;
        event_loop.exit();
    }

    // Reported by the caller of `Runtime::run`.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::debug!("runtime stopping: {err}");
        self.failure = Some(err);
        self.request_exit(event_loop);
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let kind = self.config.backend;
        let gpu_init = self.gpu_init.clone();
        let view_config = self.config.view.clone();

        let entry = WindowEntryTryBuilder {
            window,
            view_builder: |w| {
                gpu::create_backend(kind, w, gpu_init)
                    .map(|backend| ImageView::new(backend, view_config))
            },
        }
        .try_build()
        .map_err(|err| match err {
            DeviceError::Unsupported { .. } => {
                anyhow::Error::new(err).context(format!("{kind} backend is not supported here"))
            }
            other => anyhow::Error::new(other).context(format!("failed to set up {kind} view")),
        })?;

        Ok(entry)
    }

    fn record(&mut self, outcome: Option<RenderOutcome>) {
        let Some(outcome) = outcome else { return };
        if let Some(report) = self.meter.record(&outcome) {
            log::debug!(
                "render: {:.1} fps, {} skipped over {:.1}s",
                report.fps(),
                report.skipped,
                report.elapsed.as_secs_f32()
            );
        }
    }

    fn deliver_frame(&mut self) {
        let Some(image) = self.app.next_image() else { return };
        let Some(entry) = self.entry.as_mut() else { return };

        let outcome = entry.with_view_mut(|view| view.set_image(image));
        if entry.borrow_view().needs_display() {
            entry.borrow_window().request_redraw();
        }
        self.record(outcome);
    }

    fn layout(&mut self, size: PixelSize) {
        let Some(entry) = self.entry.as_mut() else { return };
        entry.with_view_mut(|view| view.layout(size));
        // Render-on-set views keep stale contents until the next frame arrives.
        if entry.borrow_view().needs_display() {
            entry.borrow_window().request_redraw();
        }
    }
}

impl<A> ApplicationHandler<RuntimeEvent> for RuntimeState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.with(|fields| {
                    log::info!(
                        "window {:?} ready: {} backend, {:?}",
                        fields.window.id(),
                        fields.view.backend_kind(),
                        fields.view.content_mode()
                    );
                    fields.window.request_redraw();
                });
                self.entry = Some(entry);
            }
            Err(err) => {
                self.fail(event_loop, err);
                return;
            }
        }

        if let Some(waker) = self.waker.take() {
            self.app.on_start(waker);
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: RuntimeEvent) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        match event {
            RuntimeEvent::FrameReady => self.deliver_frame(),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Frames arrive as user events; nothing to do between them.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.entry.as_ref() else { return };
        if entry.borrow_window().id() != window_id {
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        match &event {
            WindowEvent::CloseRequested => self.request_exit(event_loop),

            WindowEvent::Resized(new_size) => self.layout(PixelSize::from(*new_size)),

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = entry.borrow_window().inner_size();
                self.layout(PixelSize::from(size));
            }

            WindowEvent::RedrawRequested => {
                let Some(entry) = self.entry.as_mut() else { return };
                let outcome = entry.with_mut(|fields| {
                    fields.window.pre_present_notify();
                    fields.view.on_redraw()
                });
                self.record(outcome);
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.entry = None;
    }
}
