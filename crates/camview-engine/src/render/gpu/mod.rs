//! wgpu implementation of [`Compositor`](super::Compositor).
//!
//! The deferred variant targets the platform's primary modern API (Metal,
//! Vulkan or DX12) with an sRGB drawable; the immediate variant targets
//! OpenGL / GLES with a linear drawable and passthrough color.

mod compositor;
mod pipeline;
mod quad;

use winit::window::Window;

use crate::device::{DeviceError, Gpu, GpuInit};

use super::{BackendKind, DeferredBackend, ImmediateBackend, RenderBackend};

pub use compositor::WgpuCompositor;

/// Device settings for `kind`, starting from `base`.
///
/// Only the backend set and the surface color encoding are overridden.
pub fn init_for(kind: BackendKind, base: GpuInit) -> GpuInit {
    match kind {
        BackendKind::Deferred => GpuInit {
            backends: wgpu::Backends::PRIMARY,
            prefer_srgb: true,
            ..base
        },
        BackendKind::Immediate => GpuInit {
            backends: wgpu::Backends::GL,
            prefer_srgb: false,
            ..base
        },
    }
}

/// Acquires a device for `window` and wraps it in the requested backend.
///
/// Blocks until adapter and device requests resolve. Fails with
/// [`DeviceError::Unsupported`] when the platform offers no adapter for the
/// variant's graphics API.
pub fn create_backend<'w>(
    kind: BackendKind,
    window: &'w Window,
    base: GpuInit,
) -> Result<Box<dyn RenderBackend + 'w>, DeviceError> {
    let init = init_for(kind, base);
    let gpu = pollster::block_on(Gpu::new(window, init))?;
    let compositor = WgpuCompositor::new(gpu);

    log::info!("{kind} backend ready ({:?})", compositor.gpu().surface_format());

    let backend: Box<dyn RenderBackend + 'w> = match kind {
        BackendKind::Deferred => Box::new(DeferredBackend::new(compositor)),
        BackendKind::Immediate => Box::new(ImmediateBackend::new(compositor)),
    };
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deferred_targets_primary_apis_with_srgb() {
        let init = init_for(BackendKind::Deferred, GpuInit::default());
        assert_eq!(init.backends, wgpu::Backends::PRIMARY);
        assert!(init.prefer_srgb);
    }

    #[test]
    fn immediate_targets_gl_without_srgb() {
        let base = GpuInit {
            desired_maximum_frame_latency: 3,
            ..GpuInit::default()
        };
        let init = init_for(BackendKind::Immediate, base);
        assert_eq!(init.backends, wgpu::Backends::GL);
        assert!(!init.prefer_srgb);
        assert_eq!(init.desired_maximum_frame_latency, 3);
    }
}
