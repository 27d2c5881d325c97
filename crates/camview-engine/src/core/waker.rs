use winit::event_loop::EventLoopProxy;

/// User events delivered through the runtime's event loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RuntimeEvent {
    /// A producer has a new image for [`App::next_image`](super::App::next_image).
    FrameReady,
}

/// Cloneable, thread-safe handle that wakes the event loop.
#[derive(Clone)]
pub struct FrameWaker {
    proxy: EventLoopProxy<RuntimeEvent>,
}

impl FrameWaker {
    pub(crate) fn new(proxy: EventLoopProxy<RuntimeEvent>) -> Self {
        Self { proxy }
    }

    /// Signals that a frame is ready. Returns `false` once the event loop has
    /// shut down, which producers treat as a stop signal.
    pub fn wake(&self) -> bool {
        self.proxy.send_event(RuntimeEvent::FrameReady).is_ok()
    }
}

impl std::fmt::Debug for FrameWaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameWaker").finish_non_exhaustive()
    }
}
