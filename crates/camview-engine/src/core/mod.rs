//! Contract between the window runtime and the application.
//!
//! The runtime owns the event loop, the window and the view; the application
//! only supplies images and reacts to window events.

mod app;
mod waker;

pub use app::{App, AppControl};
pub use waker::{FrameWaker, RuntimeEvent};
