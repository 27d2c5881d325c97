use std::collections::BTreeMap;

use crate::image::ImageSurface;

use super::{AffineFilter, Filter, FilterConfig, FilterError, Passthrough};

struct Stage {
    filter: Box<dyn Filter>,
    config: FilterConfig,
}

/// Ordered filter stages applied to every frame.
#[derive(Default)]
pub struct FilterPipeline {
    stages: Vec<Stage>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, filter: Box<dyn Filter>, config: FilterConfig) {
        self.stages.push(Stage { filter, config });
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|s| s.filter.name())
    }

    /// Runs every stage in order. An empty pipeline returns the input.
    pub fn apply(&self, image: &ImageSurface) -> Result<ImageSurface, FilterError> {
        let mut current = image.clone();
        for stage in &self.stages {
            current = stage.filter.apply(&current, &stage.config)?;
        }
        Ok(current)
    }
}

impl std::fmt::Debug for FilterPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

type Constructor = fn() -> Box<dyn Filter>;

/// Builds filters by name.
pub struct FilterRegistry {
    constructors: BTreeMap<String, Constructor>,
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl FilterRegistry {
    pub fn empty() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Registry holding [`Passthrough`] and [`AffineFilter`].
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(Passthrough::NAME, || Box::new(Passthrough));
        registry.register(AffineFilter::NAME, || Box::new(AffineFilter));
        registry
    }

    /// Registers `constructor` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, constructor: Constructor) {
        self.constructors.insert(name.into(), constructor);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn Filter>, FilterError> {
        self.constructors
            .get(name)
            .map(|ctor| ctor())
            .ok_or_else(|| FilterError::UnknownFilter(name.to_owned()))
    }

    /// Builds a pipeline with one stage per config, in order.
    pub fn build(&self, configs: &[FilterConfig]) -> Result<FilterPipeline, FilterError> {
        let mut pipeline = FilterPipeline::new();
        for config in configs {
            pipeline.push(self.create(&config.name)?, config.clone());
        }
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::filter::FilterValue;
    use crate::render::testing::test_image;

    fn shift(x: f32) -> FilterConfig {
        FilterConfig::new(AffineFilter::NAME).with("translation", FilterValue::Vector(Vec2::new(x, 0.0)))
    }

    #[test]
    fn empty_pipeline_is_identity() {
        let img = test_image(16, 9);
        let out = FilterPipeline::new().apply(&img).unwrap();
        assert!(out.shares_pixels_with(&img));
        assert_eq!(out.extent(), img.extent());
    }

    #[test]
    fn stages_run_in_order() {
        let registry = FilterRegistry::with_builtins();
        let scale = FilterConfig::new(AffineFilter::NAME).with("scale", FilterValue::Scalar(2.0));

        let shift_then_scale = registry.build(&[shift(10.0), scale.clone()]).unwrap();
        let scale_then_shift = registry.build(&[scale, shift(10.0)]).unwrap();

        let img = test_image(4, 4);
        assert_eq!(shift_then_scale.apply(&img).unwrap().extent(), Rect::new(20.0, 0.0, 8.0, 8.0));
        assert_eq!(scale_then_shift.apply(&img).unwrap().extent(), Rect::new(10.0, 0.0, 8.0, 8.0));
    }

    #[test]
    fn unknown_name_fails_build() {
        let registry = FilterRegistry::with_builtins();
        let err = registry
            .build(&[FilterConfig::new("passthrough"), FilterConfig::new("sepia")])
            .unwrap_err();
        assert_eq!(err, FilterError::UnknownFilter("sepia".into()));
    }

    #[test]
    fn failing_stage_stops_pipeline() {
        let registry = FilterRegistry::with_builtins();
        let bad = FilterConfig::new(AffineFilter::NAME).with("scale", FilterValue::Scalar(0.0));
        let pipeline = registry.build(&[bad, shift(1.0)]).unwrap();
        assert!(matches!(pipeline.apply(&test_image(2, 2)), Err(FilterError::Degenerate { .. })));
    }

    #[test]
    fn custom_filters_can_be_registered() {
        let mut registry = FilterRegistry::empty();
        assert!(registry.create(Passthrough::NAME).is_err());
        registry.register("identity", || Box::new(Passthrough));
        let pipeline = registry.build(&[FilterConfig::new("identity")]).unwrap();
        assert_eq!(pipeline.names().collect::<Vec<_>>(), ["passthrough"]);
        assert_eq!(format!("{pipeline:?}"), "[\"passthrough\"]");
    }
}
