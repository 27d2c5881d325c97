use std::collections::BTreeMap;

use crate::coords::{ColorRgba, Vec2};

use super::FilterError;

/// A filter parameter value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FilterValue {
    Scalar(f32),
    Vector(Vec2),
    Color(ColorRgba),
}

/// Named filter plus its parameters. Parameter order is stable so configs
/// log and compare deterministically.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterConfig {
    pub name: String,
    pub params: BTreeMap<String, FilterValue>,
}

impl FilterConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: FilterValue) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<FilterValue> {
        self.params.get(key).copied()
    }

    /// Scalar parameter, `default` when absent.
    pub fn scalar_or(&self, key: &str, default: f32) -> Result<f32, FilterError> {
        match self.get(key) {
            None => Ok(default),
            Some(FilterValue::Scalar(v)) if v.is_finite() => Ok(v),
            Some(_) => Err(self.invalid(key, "a finite scalar")),
        }
    }

    /// Vector parameter, `default` when absent. A scalar is accepted and
    /// splatted to both components.
    pub fn vector_or(&self, key: &str, default: Vec2) -> Result<Vec2, FilterError> {
        match self.get(key) {
            None => Ok(default),
            Some(FilterValue::Vector(v)) if v.is_finite() => Ok(v),
            Some(FilterValue::Scalar(s)) if s.is_finite() => Ok(Vec2::new(s, s)),
            Some(_) => Err(self.invalid(key, "a finite vector or scalar")),
        }
    }

    fn invalid(&self, key: &str, expected: &'static str) -> FilterError {
        FilterError::InvalidParam {
            filter: self.name.clone(),
            param: key.to_owned(),
            expected,
        }
    }
}
