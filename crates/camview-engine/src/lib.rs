//! camview engine crate.
//!
//! Display/compositing core for a live camera viewer: geometry, orientation
//! normalization, lazy image surfaces, the filter interface, the two render
//! backends and the wgpu/winit runtime that hosts them.

pub mod coords;
pub mod camera;
pub mod image;
pub mod filter;

pub mod render;
pub mod view;
pub mod device;

pub mod core;
pub mod window;
pub mod time;
pub mod logging;
