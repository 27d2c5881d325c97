use anyhow::{bail, Context, Result};

use camview_engine::camera::CameraFacing;
use camview_engine::filter::FilterConfig;
use camview_engine::render::{BackendKind, ContentMode};

/// Viewer settings, read from `CAMVIEW_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub backend: BackendKind,
    /// `None` lets the backend pick its default.
    pub content_mode: Option<ContentMode>,
    pub facing: CameraFacing,
    pub fps: u32,
    pub frame_width: u32,
    pub frame_height: u32,
    pub filters: Vec<FilterConfig>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Deferred,
            content_mode: None,
            facing: CameraFacing::Back,
            fps: 30,
            frame_width: 1280,
            frame_height: 720,
            filters: vec![FilterConfig::new("passthrough")],
        }
    }
}

const MAX_FPS: u32 = 240;

impl ViewerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `lookup`; unset or blank keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(v) = get("CAMVIEW_BACKEND") {
            config.backend = v.parse().context("CAMVIEW_BACKEND")?;
        }
        if let Some(v) = get("CAMVIEW_CONTENT_MODE") {
            config.content_mode = Some(v.parse().context("CAMVIEW_CONTENT_MODE")?);
        }
        if let Some(v) = get("CAMVIEW_FACING") {
            config.facing = v.parse().unwrap_or_default();
        }
        if let Some(v) = get("CAMVIEW_FPS") {
            let fps: u32 = v
                .parse()
                .with_context(|| format!("CAMVIEW_FPS: '{v}' is not a frame rate"))?;
            if fps == 0 {
                bail!("CAMVIEW_FPS must be at least 1");
            }
            config.fps = fps.min(MAX_FPS);
        }
        if let Some(v) = get("CAMVIEW_FRAME_SIZE") {
            let (w, h) = parse_size(&v).with_context(|| format!("CAMVIEW_FRAME_SIZE: '{v}'"))?;
            config.frame_width = w;
            config.frame_height = h;
        }
        if let Some(v) = get("CAMVIEW_FILTERS") {
            config.filters = v
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(FilterConfig::new)
                .collect();
        }

        Ok(config)
    }
}

/// Parses `WIDTHxHEIGHT`.
fn parse_size(value: &str) -> Result<(u32, u32)> {
    let Some((w, h)) = value.split_once(['x', 'X']) else {
        bail!("expected WIDTHxHEIGHT");
    };
    let w: u32 = w.trim().parse().context("width")?;
    let h: u32 = h.trim().parse().context("height")?;
    if w == 0 || h == 0 {
        bail!("frame size must be non-zero");
    }
    Ok((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<ViewerConfig> {
        let env: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ViewerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config(&[]).unwrap(), ViewerConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let cfg = config(&[
            ("CAMVIEW_BACKEND", "immediate"),
            ("CAMVIEW_CONTENT_MODE", "fit"),
            ("CAMVIEW_FACING", "front"),
            ("CAMVIEW_FPS", "60"),
            ("CAMVIEW_FRAME_SIZE", "640x480"),
            ("CAMVIEW_FILTERS", "transform, passthrough"),
        ])
        .unwrap();

        assert_eq!(cfg.backend, BackendKind::Immediate);
        assert_eq!(cfg.content_mode, Some(ContentMode::Fit));
        assert_eq!(cfg.facing, CameraFacing::Front);
        assert_eq!(cfg.fps, 60);
        assert_eq!((cfg.frame_width, cfg.frame_height), (640, 480));
        let names: Vec<_> = cfg.filters.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["transform", "passthrough"]);
    }

    #[test]
    fn unknown_facing_is_unspecified() {
        let cfg = config(&[("CAMVIEW_FACING", "external")]).unwrap();
        assert_eq!(cfg.facing, CameraFacing::Unspecified);
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(config(&[("CAMVIEW_BACKEND", "software")]).is_err());
        assert!(config(&[("CAMVIEW_CONTENT_MODE", "stretch")]).is_err());
        assert!(config(&[("CAMVIEW_FPS", "0")]).is_err());
        assert!(config(&[("CAMVIEW_FPS", "fast")]).is_err());
        assert!(config(&[("CAMVIEW_FRAME_SIZE", "640")]).is_err());
        assert!(config(&[("CAMVIEW_FRAME_SIZE", "0x480")]).is_err());
    }

    #[test]
    fn fps_is_capped() {
        assert_eq!(config(&[("CAMVIEW_FPS", "1000")]).unwrap().fps, MAX_FPS);
    }

    #[test]
    fn blank_values_are_ignored() {
        assert_eq!(config(&[("CAMVIEW_BACKEND", "  ")]).unwrap().backend, BackendKind::Deferred);
    }
}
