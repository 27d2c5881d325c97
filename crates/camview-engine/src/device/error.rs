use thiserror::Error;

/// Errors raised while acquiring GPU resources for a view.
///
/// `Unsupported` is the "no compatible GPU capability" outcome: callers that
/// require a GPU treat it as fatal, others can fall back to another backend.
#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("no adapter supports {backends:?}: {source}")]
    Unsupported {
        backends: wgpu::Backends,
        #[source]
        source: wgpu::RequestAdapterError,
    },

    #[error("drawable has zero size")]
    ZeroSize,

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM).
    Fatal,
}
