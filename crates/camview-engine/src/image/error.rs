use thiserror::Error;

/// Errors raised when wrapping raw pixel data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("pixel buffer has zero size ({width}x{height})")]
    ZeroSize { width: u32, height: u32 },

    #[error("row stride {stride} is smaller than one row of {width} pixels")]
    StrideTooSmall { stride: u32, width: u32 },

    #[error("pixel buffer holds {actual} bytes, {expected} required")]
    TooShort { expected: usize, actual: usize },
}
