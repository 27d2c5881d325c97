use std::sync::Arc;

use camview_engine::camera::CameraFrame;
use camview_engine::core::{App, FrameWaker};
use camview_engine::filter::FilterPipeline;
use camview_engine::image::ImageSurface;
use camview_engine::view::FrameMailbox;

use crate::camera::{CameraSettings, TestPatternCamera};

/// Application glue: camera frames in, oriented and filtered surfaces out.
pub struct ViewerApp {
    settings: CameraSettings,
    pipeline: FilterPipeline,
    mailbox: Arc<FrameMailbox<CameraFrame>>,
    camera: Option<TestPatternCamera>,
    shown: u64,
}

impl ViewerApp {
    pub fn new(settings: CameraSettings, pipeline: FilterPipeline) -> Self {
        Self {
            settings,
            pipeline,
            mailbox: Arc::new(FrameMailbox::new()),
            camera: None,
            shown: 0,
        }
    }

    /// Orients the frame for display and runs the filter pipeline.
    ///
    /// A failing filter drops the frame; the next one gets a fresh attempt.
    fn process(&self, frame: &CameraFrame) -> Option<ImageSurface> {
        let oriented = frame.oriented_image();
        match self.pipeline.apply(&oriented) {
            Ok(image) => Some(image),
            Err(err) => {
                log::warn!("frame {} dropped by filters: {err}", frame.sequence);
                None
            }
        }
    }
}

impl App for ViewerApp {
    fn on_start(&mut self, waker: FrameWaker) {
        match TestPatternCamera::start(self.settings, self.mailbox.clone(), waker) {
            Ok(camera) => self.camera = Some(camera),
            Err(err) => log::error!("camera unavailable: {err:#}"),
        }
    }

    fn next_image(&mut self) -> Option<ImageSurface> {
        let frame = self.mailbox.take()?;
        let image = self.process(&frame)?;
        self.shown += 1;
        Some(image)
    }

    fn on_exit(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            camera.stop();
        }
        log::info!(
            "camera frames: {} posted, {} shown, {} superseded",
            self.mailbox.posted(),
            self.shown,
            self.mailbox.dropped()
        );
    }
}
