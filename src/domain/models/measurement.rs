use std::time::Instant;

use super::clock::ClockSource;

/// One measurement waiting to be submitted into a report.
///
/// Usage mirrors how a test runs: set `input` (empty is fine), call
/// [`start`](Self::start) before the test begins, store the JSON result in
/// `test_keys` while it executes, then call [`stop`](Self::stop). The record
/// is then handed by value to the report lifecycle for submission.
#[derive(Debug, Clone, Default)]
pub struct MeasurementRecord {
    /// Measurement input (URL, hostname, ...). Empty means no input.
    pub input: String,

    /// Time the measurement started, in the collector timestamp format.
    pub start_time: String,

    /// Test keys as a serialized JSON object.
    ///
    /// Kept as raw bytes since test code may capture network data that is
    /// not valid UTF-8; such payloads are rejected when the document is built.
    pub test_keys: Vec<u8>,

    /// Measurement runtime in seconds.
    pub runtime: f64,

    beginning: Option<Instant>,
}

impl MeasurementRecord {
    /// Create an empty measurement for `input`.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    /// Stamp `start_time` and remember the monotonic baseline.
    pub fn start(&mut self) {
        self.start_time = ClockSource::now_formatted();
        self.beginning = Some(ClockSource::monotonic_now());
    }

    /// Compute `runtime` from the baseline recorded by `start`.
    ///
    /// Calling `stop` without `start` leaves `runtime` at zero.
    pub fn stop(&mut self) {
        self.runtime = self.beginning.map_or(0.0, ClockSource::elapsed_seconds);
    }

    /// Replace the test keys with a serialized JSON payload.
    pub fn set_test_keys(&mut self, test_keys: impl Into<Vec<u8>>) {
        self.test_keys = test_keys.into();
    }
}
