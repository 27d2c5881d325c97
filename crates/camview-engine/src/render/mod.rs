//! Render target adapters.
//!
//! A [`RenderBackend`] turns the current image, a [`ContentMode`] and a
//! background color into one render pass on its drawable. Backends never touch
//! a GPU API directly: they drive a [`Compositor`], which owns the device,
//! queue and drawable. Two variants exist:
//!
//! - [`DeferredBackend`]: tile-based / modern GPU path. Fit-only, renders as
//!   soon as an image is set.
//! - [`ImmediateBackend`]: immediate-mode path. Fit or Fill, renders on the
//!   drawable's next redraw cycle.
//!
//! [`gpu`] provides the wgpu-backed compositor and the constructor that picks
//! the matching wgpu backends for each variant.

mod backend;
mod compositor;
mod deferred;
mod immediate;
pub mod gpu;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{
    BackendCaps, BackendKind, ContentMode, ParseModeError, RenderBackend, RenderOutcome,
    RenderSchedule, SkipReason,
};
pub use compositor::{ColorSpace, Compositor};
pub use deferred::DeferredBackend;
pub use immediate::ImmediateBackend;
