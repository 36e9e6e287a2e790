use std::time::Duration;
use thiserror::Error;

/// Errors returned by a [`Collector`] implementation.
#[derive(Error, Debug)]
pub enum CollectorError {
    /// The request could not be built from the given parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The request could not be sent or no response was received.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The collector answered with a non-success status.
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The collector answered but the body was not what the protocol expects.
    #[error("Invalid collector response: {0}")]
    InvalidResponse(String),

    /// The trust bundle could not be loaded.
    #[error("Cannot load trust bundle {path}: {reason}")]
    TrustBundle { path: String, reason: String },
}

/// Parameters of a report open call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    pub probe_asn: String,
    pub probe_cc: String,
    pub software_name: String,
    pub software_version: String,
    pub test_name: String,
    pub test_version: String,
    pub test_start_time: String,
    pub base_url: String,
    pub trust_bundle_path: Option<String>,
    pub timeout: Duration,
}

/// Parameters of a measurement submission call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub report_id: String,
    pub base_url: String,
    /// Serialized measurement document.
    pub content: String,
    pub trust_bundle_path: Option<String>,
    pub timeout: Duration,
}

/// Parameters of a report close call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseRequest {
    pub report_id: String,
    pub base_url: String,
    pub trust_bundle_path: Option<String>,
    pub timeout: Duration,
}

/// Remote service accepting report open/update/close calls.
///
/// Implementations perform exactly one blocking call per method, bounded by
/// the request timeout, and never retry. Human-readable progress lines may be
/// appended to `logs`.
pub trait Collector: Send + Sync {
    /// Open a report and return the id assigned by the collector.
    fn open(&self, request: &OpenRequest, logs: &mut Vec<String>) -> Result<String, CollectorError>;

    /// Submit one serialized measurement into an open report.
    fn update(&self, request: &UpdateRequest, logs: &mut Vec<String>)
        -> Result<(), CollectorError>;

    /// Close an open report.
    fn close(&self, request: &CloseRequest, logs: &mut Vec<String>) -> Result<(), CollectorError>;
}
