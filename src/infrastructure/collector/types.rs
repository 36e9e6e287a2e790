//! Request and response bodies of the collector HTTP API
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::ports::OpenRequest;
use crate::services::DATA_FORMAT_VERSION;

/// Body of `POST /report`.
#[derive(Debug, Serialize)]
pub struct OpenReportBody<'a> {
    pub software_name: &'a str,
    pub software_version: &'a str,
    pub probe_asn: &'a str,
    pub probe_cc: &'a str,
    pub test_name: &'a str,
    pub test_version: &'a str,
    pub data_format_version: &'static str,
    pub test_start_time: &'a str,
    pub input_hashes: Vec<String>,
    pub test_helpers: Map<String, Value>,
    pub format: &'static str,
}

impl<'a> From<&'a OpenRequest> for OpenReportBody<'a> {
    fn from(request: &'a OpenRequest) -> Self {
        Self {
            software_name: &request.software_name,
            software_version: &request.software_version,
            probe_asn: &request.probe_asn,
            probe_cc: &request.probe_cc,
            test_name: &request.test_name,
            test_version: &request.test_version,
            data_format_version: DATA_FORMAT_VERSION,
            test_start_time: &request.test_start_time,
            input_hashes: Vec::new(),
            test_helpers: Map::new(),
            format: "json",
        }
    }
}

/// Response of `POST /report`.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenReportResponse {
    /// Identifier of the new report
    #[serde(default)]
    pub report_id: String,

    /// Collector software version, when advertised
    #[serde(default)]
    pub backend_version: Option<String>,
}

/// Body of `POST /report/{id}`.
#[derive(Debug, Serialize)]
pub struct UpdateReportBody {
    pub format: &'static str,
    pub content: Value,
}

impl UpdateReportBody {
    /// Wrap a serialized measurement document.
    pub fn json(content: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            format: "json",
            content: serde_json::from_str(content)?,
        })
    }
}
