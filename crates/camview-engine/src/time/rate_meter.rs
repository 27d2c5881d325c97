use std::time::{Duration, Instant};

use crate::render::RenderOutcome;

/// Counts accumulated over one reporting window.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RateReport {
    pub presented: u64,
    pub skipped: u64,
    pub elapsed: Duration,
}

impl RateReport {
    /// Presented frames per second over the window.
    pub fn fps(&self) -> f32 {
        let secs = self.elapsed.as_secs_f32();
        if secs <= 0.0 {
            return 0.0;
        }
        self.presented as f32 / secs
    }
}

/// Aggregates render outcomes and emits a [`RateReport`] once per interval.
#[derive(Debug, Clone)]
pub struct RateMeter {
    interval: Duration,
    window_start: Instant,
    presented: u64,
    skipped: u64,
}

impl RateMeter {
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    pub fn starting_at(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            window_start: start,
            presented: 0,
            skipped: 0,
        }
    }

    pub fn record(&mut self, outcome: &RenderOutcome) -> Option<RateReport> {
        self.record_at(outcome, Instant::now())
    }

    /// Records `outcome` observed at `now`. Returns the finished window's
    /// report when `now` is at least one interval past the window start.
    pub fn record_at(&mut self, outcome: &RenderOutcome, now: Instant) -> Option<RateReport> {
        match outcome {
            RenderOutcome::Presented { .. } => self.presented += 1,
            RenderOutcome::Skipped(_) => self.skipped += 1,
        }

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.interval {
            return None;
        }

        let report = RateReport {
            presented: self.presented,
            skipped: self.skipped,
            elapsed,
        };
        self.window_start = now;
        self.presented = 0;
        self.skipped = 0;
        Some(report)
    }
}

impl Default for RateMeter {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::render::SkipReason;

    const SHOWN: RenderOutcome = RenderOutcome::Presented {
        target: Rect::new(0.0, 0.0, 1.0, 1.0),
    };
    const SKIPPED: RenderOutcome = RenderOutcome::Skipped(SkipReason::NoDrawable);

    #[test]
    fn reports_once_per_interval() {
        let t0 = Instant::now();
        let mut meter = RateMeter::starting_at(Duration::from_secs(1), t0);

        for i in 1..30 {
            assert_eq!(meter.record_at(&SHOWN, t0 + Duration::from_millis(i * 33)), None);
        }
        meter.record_at(&SKIPPED, t0 + Duration::from_millis(990));

        let report = meter.record_at(&SHOWN, t0 + Duration::from_secs(1)).unwrap();
        assert_eq!(report.presented, 30);
        assert_eq!(report.skipped, 1);
        assert!((report.fps() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn window_restarts_after_report() {
        let t0 = Instant::now();
        let mut meter = RateMeter::starting_at(Duration::from_millis(100), t0);
        assert!(meter.record_at(&SHOWN, t0 + Duration::from_millis(150)).is_some());
        assert!(meter.record_at(&SHOWN, t0 + Duration::from_millis(200)).is_none());

        let report = meter.record_at(&SKIPPED, t0 + Duration::from_millis(250)).unwrap();
        assert_eq!((report.presented, report.skipped), (1, 1));
        assert_eq!(report.elapsed, Duration::from_millis(100));
    }

    #[test]
    fn zero_elapsed_has_zero_fps() {
        let report = RateReport {
            presented: 3,
            skipped: 0,
            elapsed: Duration::ZERO,
        };
        assert_eq!(report.fps(), 0.0);
    }
}
