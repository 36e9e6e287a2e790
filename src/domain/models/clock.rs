//! Time sources used when stamping reports and measurements.

use chrono::{DateTime, SubsecRound, Utc};
use std::time::Instant;

/// Timestamp layout expected by the collector (UTC, whole seconds).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wall-clock and monotonic time source.
///
/// Wall-clock readings are only used for the textual timestamps that end up
/// in the report. Durations are always measured with the monotonic clock so
/// that clock adjustments during a test cannot produce a negative runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockSource;

impl ClockSource {
    /// Format the current UTC time in the collector timestamp format.
    pub fn now_formatted() -> String {
        format_timestamp(Utc::now())
    }

    /// Read the monotonic clock.
    pub fn monotonic_now() -> Instant {
        Instant::now()
    }

    /// Seconds elapsed since `baseline` as a float.
    pub fn elapsed_seconds(baseline: Instant) -> f64 {
        baseline.elapsed().as_secs_f64()
    }
}

/// Format `time` in the collector timestamp format, dropping sub-second
/// precision.
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.trunc_subsecs(0).format(TIMESTAMP_FORMAT).to_string()
}
