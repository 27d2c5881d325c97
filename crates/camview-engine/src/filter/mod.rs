//! Filter pipeline interface.
//!
//! Filters turn one [`ImageSurface`](crate::image::ImageSurface) into another.
//! They are expected to stay lazy: geometric filters only append transforms,
//! pixel work is left to the compositor.

mod builtin;
mod config;
mod error;
mod pipeline;

pub use builtin::{AffineFilter, Passthrough};
pub use config::{FilterConfig, FilterValue};
pub use error::FilterError;
pub use pipeline::{FilterPipeline, FilterRegistry};

use crate::image::ImageSurface;

/// One stage of a filter pipeline.
pub trait Filter: Send {
    /// Registry name of the filter.
    fn name(&self) -> &str;

    fn apply(&self, image: &ImageSurface, config: &FilterConfig) -> Result<ImageSurface, FilterError>;
}
