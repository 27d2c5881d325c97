use winit::event::WindowEvent;

use crate::image::ImageSurface;

use super::FrameWaker;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by binaries.
pub trait App {
    /// Called once the event loop exists. Producers keep the waker and call
    /// [`FrameWaker::wake`] whenever a new image is ready.
    fn on_start(&mut self, waker: FrameWaker) {
        let _ = waker;
    }

    /// Called for every window event before the runtime handles it.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called on the event-loop thread after a wake-up. Returns the image to
    /// display, or `None` when nothing new is available.
    fn next_image(&mut self) -> Option<ImageSurface>;

    /// Called once when the event loop is about to exit.
    fn on_exit(&mut self) {}
}
