use thiserror::Error;

use super::ports::collector::CollectorError;
use super::ports::discovery::DiscoveryError;
use super::ports::geo_db::GeoError;

/// Errors surfaced by the report lifecycle and its helpers.
///
/// Every variant renders as a single human-readable line; the same line is
/// appended to the caller's diagnostic log when the error is produced.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A mandatory field is missing, or the report is in the wrong state.
    #[error("{0}")]
    Validation(String),

    /// The collector was reached but reported failure, or could not be reached.
    #[error("Collector call failed: {0}")]
    Protocol(#[from] CollectorError),

    /// A JSON payload is malformed or has the wrong shape.
    #[error("Cannot parse JSON: {0}")]
    Parse(String),

    /// An assembled document cannot be encoded.
    #[error("Cannot serialize JSON: {0}")]
    Serialization(String),

    /// Collector or probe location discovery failed.
    #[error("Discovery failed: {0}")]
    Discovery(String),
}

impl ReportError {
    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error was raised before any collaborator was contacted.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<DiscoveryError> for ReportError {
    fn from(err: DiscoveryError) -> Self {
        Self::Discovery(err.to_string())
    }
}

impl From<GeoError> for ReportError {
    fn from(err: GeoError) -> Self {
        Self::Discovery(err.to_string())
    }
}

/// Append `err` to `logs` and hand it back, so failures read
/// `return Err(record(logs, err))`.
pub(crate) fn record(logs: &mut Vec<String>, err: ReportError) -> ReportError {
    logs.push(err.to_string());
    err
}
