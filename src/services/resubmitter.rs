use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::collector_discovery::CollectorDiscovery;
use super::report_lifecycle::ReportLifecycle;
use crate::domain::error::record;
use crate::domain::models::ReportEnvelope;
use crate::domain::ports::{Collector, Discovery};
use crate::domain::ReportError;

/// Replays a previously serialized measurement into a fresh report on a
/// newly discovered collector.
///
/// The report opened for the replay lives in a temporary lifecycle, so it is
/// closed on a best-effort basis when the recipe returns, on success and on
/// any failure after the open.
pub struct Resubmitter {
    collector: Arc<dyn Collector>,
    discovery: CollectorDiscovery,
    discovery_base_url: Option<String>,
}

impl Resubmitter {
    /// Resubmitter opening reports on `collector`, located through `discovery`.
    pub fn new(collector: Arc<dyn Collector>, discovery: Arc<dyn Discovery>) -> Self {
        Self {
            collector,
            discovery: CollectorDiscovery::new(discovery),
            discovery_base_url: None,
        }
    }

    /// Query this discovery endpoint instead of the discovery default.
    #[must_use]
    pub fn with_discovery_base_url(mut self, url: impl Into<String>) -> Self {
        self.discovery_base_url = Some(url.into());
        self
    }

    /// Resubmit `serialized_measurement` and return the id of the new report.
    ///
    /// Any report id present in the input is discarded and replaced by the
    /// id of the freshly opened report.
    ///
    /// The new report is always closed before this returns, on success and
    /// on any failure after the open. The close is best-effort and its
    /// outcome does not affect the result, so the returned id refers to a
    /// report that is no longer open.
    pub fn resubmit(
        &self,
        serialized_measurement: &str,
        trust_bundle_path: Option<&str>,
        timeout: Duration,
        logs: &mut Vec<String>,
    ) -> Result<String, ReportError> {
        let mut document = parse_document(serialized_measurement).map_err(|e| record(logs, e))?;
        let envelope = envelope_from(&document, trust_bundle_path, timeout)
            .map_err(|e| record(logs, e))?;

        let collector_url = self.discovery.discover(
            &envelope.test_name,
            &envelope.test_version,
            self.discovery_base_url.as_deref(),
            logs,
        )?;

        let mut lifecycle = ReportLifecycle::new(
            ReportEnvelope {
                collector_base_url: collector_url,
                ..envelope
            },
            Arc::clone(&self.collector),
        );
        lifecycle.open(logs)?;
        let report_id = lifecycle.envelope().id.clone();

        document.insert("report_id".to_string(), Value::String(report_id.clone()));
        let content = serde_json::to_string(&document)
            .map_err(|e| record(logs, ReportError::Serialization(e.to_string())))?;

        lifecycle.submit_content(content, logs).inspect_err(|e| {
            warn!(report_id = %report_id, error = %e, "resubmission failed");
        })?;
        info!(report_id = %report_id, "measurement resubmitted");
        Ok(report_id)
    }
}

fn parse_document(serialized: &str) -> Result<Map<String, Value>, ReportError> {
    match serde_json::from_str::<Value>(serialized) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ReportError::Parse(
            "Measurement is not a JSON object".to_string(),
        )),
        Err(e) => Err(ReportError::Parse(e.to_string())),
    }
}

fn envelope_from(
    document: &Map<String, Value>,
    trust_bundle_path: Option<&str>,
    timeout: Duration,
) -> Result<ReportEnvelope, ReportError> {
    let field = |name: &str| match document.get(name).and_then(Value::as_str) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ReportError::validation(format!(
            "Measurement is missing the {name} field"
        ))),
    };

    Ok(ReportEnvelope {
        probe_asn: field("probe_asn")?,
        probe_cc: field("probe_cc")?,
        software_name: field("software_name")?,
        software_version: field("software_version")?,
        test_name: field("test_name")?,
        test_version: field("test_version")?,
        test_start_time: field("test_start_time")?,
        trust_bundle_path: trust_bundle_path.unwrap_or_default().to_string(),
        timeout,
        ..Default::default()
    })
}
