use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

use crate::domain::error::record;
use crate::domain::models::{MeasurementRecord, ReportEnvelope};
use crate::domain::ReportError;

/// Version of the measurement document layout.
pub const DATA_FORMAT_VERSION: &str = "0.2.0";

/// Key injected into the test keys to describe the resolver in use.
pub const CLIENT_RESOLVER_KEY: &str = "client_resolver";

/// Builds the measurement document submitted to the collector.
///
/// The resolver address injected into the test keys and the document id are
/// configuration inputs. Without a configured resolver the injected value is
/// `null`; without a configured document id each document gets a fresh UUID.
#[derive(Debug, Clone, Default)]
pub struct EnvelopeBuilder {
    client_resolver: Option<String>,
    document_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct MeasurementDocument<'a> {
    annotations: &'a BTreeMap<String, String>,
    data_format_version: &'static str,
    id: String,
    input: Option<&'a str>,
    input_hashes: Vec<String>,
    measurement_start_time: &'a str,
    options: Vec<String>,
    probe_asn: &'a str,
    probe_cc: &'a str,
    probe_city: Option<&'a str>,
    report_id: &'a str,
    software_name: &'a str,
    software_version: &'a str,
    test_helpers: Map<String, Value>,
    test_keys: Map<String, Value>,
    test_name: &'a str,
    test_runtime: f64,
    test_start_time: &'a str,
    test_version: &'a str,
}

impl EnvelopeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver address injected into every document's test keys.
    #[must_use]
    pub fn with_client_resolver(mut self, resolver: impl Into<String>) -> Self {
        self.client_resolver = Some(resolver.into());
        self
    }

    /// Fixed document id instead of a fresh UUID per document.
    #[must_use]
    pub fn with_document_id(mut self, id: impl Into<String>) -> Self {
        self.document_id = Some(id.into());
        self
    }

    /// Serialize `measurement` into a complete document for `envelope`.
    ///
    /// Fails without producing any output when the test keys are not valid
    /// UTF-8, are not valid JSON, or are not a JSON object, and when the
    /// runtime has no JSON number encoding (NaN or infinite).
    pub fn build(
        &self,
        envelope: &ReportEnvelope,
        measurement: &MeasurementRecord,
        logs: &mut Vec<String>,
    ) -> Result<String, ReportError> {
        let mut test_keys = parse_test_keys(&measurement.test_keys).map_err(|e| record(logs, e))?;
        if !measurement.runtime.is_finite() {
            return Err(record(
                logs,
                ReportError::Serialization(format!(
                    "Runtime {} is not a finite number",
                    measurement.runtime
                )),
            ));
        }
        test_keys.insert(
            CLIENT_RESOLVER_KEY.to_string(),
            self.client_resolver
                .clone()
                .map_or(Value::Null, Value::String),
        );

        let document = MeasurementDocument {
            annotations: &envelope.annotations,
            data_format_version: DATA_FORMAT_VERSION,
            id: self
                .document_id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            input: if measurement.input.is_empty() {
                None
            } else {
                Some(measurement.input.as_str())
            },
            input_hashes: Vec::new(),
            measurement_start_time: &measurement.start_time,
            options: Vec::new(),
            probe_asn: &envelope.probe_asn,
            probe_cc: &envelope.probe_cc,
            probe_city: None,
            report_id: &envelope.id,
            software_name: &envelope.software_name,
            software_version: &envelope.software_version,
            test_helpers: Map::new(),
            test_keys,
            test_name: &envelope.test_name,
            test_runtime: measurement.runtime,
            test_start_time: &envelope.test_start_time,
            test_version: &envelope.test_version,
        };

        let content = serde_json::to_string(&document)
            .map_err(|e| record(logs, ReportError::Serialization(e.to_string())))?;
        debug!(
            report_id = %envelope.id,
            bytes = content.len(),
            "measurement document built"
        );
        Ok(content)
    }
}

fn parse_test_keys(raw: &[u8]) -> Result<Map<String, Value>, ReportError> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| ReportError::Serialization(format!("test keys are not valid UTF-8: {e}")))?;
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ReportError::Parse("Test keys is not a JSON object".to_string())),
        Err(e) => Err(ReportError::Parse(e.to_string())),
    }
}
