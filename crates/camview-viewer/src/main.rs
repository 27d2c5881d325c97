//! camview: live camera viewer.
//!
//! Configuration comes from the environment:
//!
//! - `CAMVIEW_BACKEND`: `deferred` (Vulkan/Metal/DX12) or `immediate` (GL)
//! - `CAMVIEW_CONTENT_MODE`: `fit` or `fill`
//! - `CAMVIEW_FACING`: `front`, `back`, anything else for no orientation
//! - `CAMVIEW_FPS`, `CAMVIEW_FRAME_SIZE` (`WIDTHxHEIGHT`)
//! - `CAMVIEW_FILTERS`: comma-separated filter names
//! - `RUST_LOG`: log filter

mod app;
mod camera;
mod config;

use std::process::ExitCode;

use anyhow::{Context, Result};

use camview_engine::coords::ColorRgba;
use camview_engine::device::{DeviceError, GpuInit};
use camview_engine::filter::FilterRegistry;
use camview_engine::logging::{init_logging, LoggingConfig};
use camview_engine::view::ViewConfig;
use camview_engine::window::{LogicalSize, Runtime, RuntimeConfig};

use crate::app::ViewerApp;
use crate::camera::CameraSettings;
use crate::config::ViewerConfig;

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(DeviceError::Unsupported { .. }) = err.downcast_ref::<DeviceError>() {
                log::error!("{err:#}");
                log::error!("try CAMVIEW_BACKEND=immediate or =deferred");
                return ExitCode::from(2);
            }
            log::error!("camview failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = ViewerConfig::from_env().context("invalid configuration")?;
    log::info!(
        "camview: {} backend, mode {:?}, facing {:?}",
        config.backend,
        config.content_mode,
        config.facing
    );

    let pipeline = FilterRegistry::with_builtins()
        .build(&config.filters)
        .context("failed to build filter pipeline")?;
    log::debug!("filter pipeline: {pipeline:?}");

    let settings = CameraSettings {
        width: config.frame_width,
        height: config.frame_height,
        fps: config.fps,
        facing: config.facing,
    };
    let app = ViewerApp::new(settings, pipeline);

    let runtime_config = RuntimeConfig {
        title: format!("camview ({})", config.backend),
        initial_size: LogicalSize::new(540.0, 960.0),
        backend: config.backend,
        view: ViewConfig {
            content_mode: config.content_mode,
            background: ColorRgba::white(),
        },
    };

    Runtime::run(runtime_config, GpuInit::default(), app)
}
