//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue from an explicit [`GpuInit`]
//! - creating & configuring the Surface (swapchain)
//! - acquiring drawables and presenting them

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::{DeviceError, SurfaceErrorAction};
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
