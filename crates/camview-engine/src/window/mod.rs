//! Window + runtime loop.
//!
//! Owns the `winit` event loop and the window, and wires them to the view.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
pub use winit::dpi::LogicalSize;
pub use winit::event::WindowEvent;
