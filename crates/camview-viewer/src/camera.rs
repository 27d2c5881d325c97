//! Synthetic capture source standing in for a camera session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use camview_engine::camera::{CameraFacing, CameraFrame};
use camview_engine::core::FrameWaker;
use camview_engine::image::{ImageError, PixelBuffer, PixelFormat};
use camview_engine::view::FrameMailbox;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraSettings {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub facing: CameraFacing,
}

/// Worker thread that produces test-pattern frames in sensor orientation
/// (landscape, like a phone sensor) and hands them to a mailbox.
pub struct TestPatternCamera {
    should_stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl TestPatternCamera {
    pub fn start(
        settings: CameraSettings,
        mailbox: Arc<FrameMailbox<CameraFrame>>,
        waker: FrameWaker,
    ) -> Result<Self> {
        let should_stop = Arc::new(AtomicBool::new(false));
        let stop = should_stop.clone();

        let handle = std::thread::Builder::new()
            .name("camview-camera".into())
            .spawn(move || capture_loop(settings, &mailbox, &waker, &stop))
            .context("failed to spawn camera thread")?;

        log::info!(
            "test camera started: {}x{} @ {} fps, {:?}",
            settings.width,
            settings.height,
            settings.fps,
            settings.facing
        );

        Ok(Self {
            should_stop,
            handle: Some(handle),
        })
    }

    pub fn stop(&mut self) {
        self.should_stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("camera thread panicked");
            }
        }
    }
}

impl Drop for TestPatternCamera {
    fn drop(&mut self) {
        self.stop();
    }
}

fn capture_loop(
    settings: CameraSettings,
    mailbox: &FrameMailbox<CameraFrame>,
    waker: &FrameWaker,
    should_stop: &AtomicBool,
) {
    let mut pacer = FramePacer::new(settings.fps, Instant::now());
    let mut sequence = 0u64;

    while !should_stop.load(Ordering::Relaxed) {
        let pixels = match test_pattern(settings.width, settings.height, sequence) {
            Ok(px) => px,
            Err(err) => {
                log::error!("test pattern rejected: {err}");
                return;
            }
        };

        mailbox.post(CameraFrame::new(Arc::new(pixels), settings.facing, sequence));
        if !waker.wake() {
            log::debug!("event loop closed; camera stopping");
            return;
        }

        sequence += 1;
        let deadline = pacer.advance();
        if let Some(wait) = deadline.checked_duration_since(Instant::now()) {
            std::thread::sleep(wait);
        }
    }

    log::debug!("camera stopped after {sequence} frames");
}

/// Absolute frame deadlines at a fixed rate, so a slow frame does not shift
/// the cadence.
struct FramePacer {
    period: Duration,
    next_deadline: Instant,
}

impl FramePacer {
    fn new(fps: u32, start: Instant) -> Self {
        Self {
            period: Duration::from_secs(1) / fps.max(1),
            next_deadline: start,
        }
    }

    /// Deadline of the next frame.
    fn advance(&mut self) -> Instant {
        self.next_deadline += self.period;
        self.next_deadline
    }
}

const BARS: [[u8; 3]; 7] = [
    [192, 192, 192],
    [192, 192, 0],
    [0, 192, 192],
    [0, 192, 0],
    [192, 0, 192],
    [192, 0, 0],
    [0, 0, 192],
];

/// BGRA color bars with a white bar sweeping left to right and a red marker
/// in the top-left corner, so orientation and mirroring are visible.
pub fn test_pattern(width: u32, height: u32, sequence: u64) -> Result<PixelBuffer, ImageError> {
    if width == 0 || height == 0 {
        return PixelBuffer::new(width, height, PixelFormat::Bgra8, Vec::new());
    }

    let (w, h) = (width as usize, height as usize);
    let mut data = vec![0u8; w * h * 4];

    let sweep = (sequence as usize * 4) % w;
    let sweep_width = (w / 64).max(2);
    let marker = (w.min(h) / 8).max(1);

    for (y, row) in data.chunks_exact_mut(w * 4).enumerate() {
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            let [r, g, b] = if x < marker && y < marker {
                [255, 0, 0]
            } else if x >= sweep && x < sweep + sweep_width {
                [255, 255, 255]
            } else {
                BARS[x * BARS.len() / w]
            };
            px.copy_from_slice(&[b, g, r, 255]);
        }
    }

    PixelBuffer::new(width, height, PixelFormat::Bgra8, data)
}
