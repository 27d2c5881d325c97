//! Render rate measurement.
//!
//! One [`RateMeter`] per view; feed it every render outcome and log the
//! reports it returns.

mod rate_meter;

pub use rate_meter::{RateMeter, RateReport};
