use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use crate::coords::{ColorRgba, PixelSize, Rect};
use crate::image::ImageSurface;

/// Content-fit policy used when the image and drawable aspect ratios differ.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ContentMode {
    /// Entirely contained, may letterbox.
    Fit,
    /// Entirely covers, may crop.
    Fill,
}

impl ContentMode {
    /// Rectangle `source` occupies inside `target` under this policy.
    pub fn place(self, source: Rect, target: Rect) -> Rect {
        match self {
            ContentMode::Fit => source.aspect_fit(target),
            ContentMode::Fill => source.aspect_fill(target),
        }
    }
}

/// Which render backend variant a view uses.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Tile-based / deferred GPU path (Metal, Vulkan, DX12).
    Deferred,
    /// Immediate-mode path (OpenGL / GLES).
    Immediate,
}

/// When a backend performs its render pass.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderSchedule {
    /// Synchronously, as soon as a new image is set.
    OnSet,
    /// On the drawable's next redraw callback; setting an image only marks the
    /// view dirty.
    NextCycle,
}

/// Static description of what a backend supports.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BackendCaps {
    /// Supported content modes; the first entry is the backend's default.
    pub content_modes: &'static [ContentMode],
    pub schedule: RenderSchedule,
}

impl BackendCaps {
    #[inline]
    pub fn supports(&self, mode: ContentMode) -> bool {
        self.content_modes.contains(&mode)
    }

    #[inline]
    pub fn default_mode(&self) -> ContentMode {
        self.content_modes.first().copied().unwrap_or(ContentMode::Fit)
    }
}

/// Why a render pass did not produce pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoImage,
    NoDrawable,
    EmptyExtent,
}

/// Result of one render request. Skips are expected and never errors.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RenderOutcome {
    /// The pass was issued; `target` is where the image landed in drawable
    /// coordinates.
    Presented { target: Rect },
    Skipped(SkipReason),
}

impl RenderOutcome {
    #[inline]
    pub fn is_presented(&self) -> bool {
        matches!(self, RenderOutcome::Presented { .. })
    }
}

/// Render target adapter: one destination surface, one backend strategy.
///
/// `render` issues GPU work and returns without waiting for it; presentation
/// and completion are the backend's business.
pub trait RenderBackend {
    fn kind(&self) -> BackendKind;

    fn capabilities(&self) -> BackendCaps;

    /// Current drawable size in physical pixels.
    fn drawable_size(&self) -> PixelSize;

    /// Resizes the drawable. Never renders.
    fn resize(&mut self, size: PixelSize);

    /// Runs one render pass for `image`.
    ///
    /// Backends that do not support `mode` fall back to their default mode.
    fn render(
        &mut self,
        image: Option<&ImageSurface>,
        mode: ContentMode,
        background: ColorRgba,
    ) -> RenderOutcome;
}

/// Error returned when parsing a [`ContentMode`] or [`BackendKind`] name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {what} '{value}'")]
pub struct ParseModeError {
    what: &'static str,
    value: String,
}

impl FromStr for ContentMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fit" | "aspect-fit" => Ok(ContentMode::Fit),
            "fill" | "aspect-fill" => Ok(ContentMode::Fill),
            _ => Err(ParseModeError {
                what: "content mode",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for BackendKind {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deferred" | "metal" | "vulkan" => Ok(BackendKind::Deferred),
            "immediate" | "gl" | "opengl" => Ok(BackendKind::Immediate),
            _ => Err(ParseModeError {
                what: "backend",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BackendKind::Deferred => "deferred",
            BackendKind::Immediate => "immediate",
        })
    }
}
