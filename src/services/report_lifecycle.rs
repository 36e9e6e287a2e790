use std::sync::Arc;
use tracing::{debug, info, warn};

use super::envelope_builder::EnvelopeBuilder;
use super::validator::Validator;
use crate::domain::error::record;
use crate::domain::models::{MeasurementRecord, ReportEnvelope};
use crate::domain::ports::{CloseRequest, Collector, CollectorError, OpenRequest, UpdateRequest};
use crate::domain::ReportError;

/// Whether a report is open with the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportState {
    /// No report id is held.
    Closed,
    /// A report id is held; submit and close are allowed.
    Open,
}

/// Open/submit/close state machine for one report.
///
/// The lifecycle owns the envelope whose `id` is the open-report capability.
/// It is not meant to be shared between threads: run concurrent
/// measurements through distinct lifecycles.
///
/// Dropping a lifecycle while a report is still open performs one
/// best-effort close whose outcome is discarded.
pub struct ReportLifecycle {
    envelope: ReportEnvelope,
    collector: Arc<dyn Collector>,
    builder: EnvelopeBuilder,
}

impl ReportLifecycle {
    /// Lifecycle for `envelope`, talking to `collector` with the default builder.
    pub fn new(envelope: ReportEnvelope, collector: Arc<dyn Collector>) -> Self {
        Self {
            envelope,
            collector,
            builder: EnvelopeBuilder::default(),
        }
    }

    /// Use `builder` to produce measurement documents.
    #[must_use]
    pub fn with_builder(mut self, builder: EnvelopeBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// The envelope, including the current report id.
    pub fn envelope(&self) -> &ReportEnvelope {
        &self.envelope
    }

    /// Mutable access to the envelope, e.g. to fill fields before `open`.
    pub fn envelope_mut(&mut self) -> &mut ReportEnvelope {
        &mut self.envelope
    }

    /// Open while the envelope holds a report id.
    pub fn state(&self) -> ReportState {
        if self.envelope.is_open() {
            ReportState::Open
        } else {
            ReportState::Closed
        }
    }

    /// Open a report with the configured collector and store its id.
    ///
    /// Fails without contacting the collector when a report is already open
    /// or a mandatory field is missing; exactly one log line names the
    /// first missing field.
    pub fn open(&mut self, logs: &mut Vec<String>) -> Result<(), ReportError> {
        Validator::check_open(&self.envelope).map_err(|e| record(logs, e))?;

        let envelope = &self.envelope;
        let request = OpenRequest {
            probe_asn: envelope.probe_asn.clone(),
            probe_cc: envelope.probe_cc.clone(),
            software_name: envelope.software_name.clone(),
            software_version: envelope.software_version.clone(),
            test_name: envelope.test_name.clone(),
            test_version: envelope.test_version.clone(),
            test_start_time: envelope.test_start_time.clone(),
            base_url: envelope.collector_base_url.clone(),
            trust_bundle_path: envelope.trust_bundle().map(ToString::to_string),
            timeout: envelope.timeout,
        };
        debug!(collector = %request.base_url, test_name = %request.test_name, "opening report");

        let report_id = self
            .collector
            .open(&request, logs)
            .and_then(|id| {
                if id.is_empty() {
                    Err(CollectorError::InvalidResponse(
                        "empty report id".to_string(),
                    ))
                } else {
                    Ok(id)
                }
            })
            .map_err(|e| {
                warn!(error = %e, "report open failed");
                record(logs, e.into())
            })?;

        info!(report_id = %report_id, "report opened");
        self.envelope.id = report_id;
        Ok(())
    }

    /// Serialize `measurement` and submit it into the open report.
    pub fn submit(
        &mut self,
        measurement: MeasurementRecord,
        logs: &mut Vec<String>,
    ) -> Result<(), ReportError> {
        Validator::check_open_report(&self.envelope).map_err(|e| record(logs, e))?;
        let content = self.make_content(&measurement, logs)?;
        self.update(content, logs)
    }

    /// Submit an already serialized measurement document into the open
    /// report, bypassing the document builder.
    pub fn submit_content(
        &mut self,
        content: String,
        logs: &mut Vec<String>,
    ) -> Result<(), ReportError> {
        Validator::check_open_report(&self.envelope).map_err(|e| record(logs, e))?;
        self.update(content, logs)
    }

    /// Build the document that `submit` would send for `measurement`.
    pub fn make_content(
        &self,
        measurement: &MeasurementRecord,
        logs: &mut Vec<String>,
    ) -> Result<String, ReportError> {
        self.builder.build(&self.envelope, measurement, logs)
    }

    /// Close the open report.
    ///
    /// Once the collector has been contacted the local id is cleared whether
    /// or not the remote close succeeded.
    pub fn close(&mut self, logs: &mut Vec<String>) -> Result<(), ReportError> {
        Validator::check_open_report(&self.envelope).map_err(|e| record(logs, e))?;

        let request = CloseRequest {
            report_id: self.envelope.id.clone(),
            base_url: self.envelope.collector_base_url.clone(),
            trust_bundle_path: self.envelope.trust_bundle().map(ToString::to_string),
            timeout: self.envelope.timeout,
        };
        debug!(report_id = %request.report_id, "closing report");

        let result = self.collector.close(&request, logs);
        self.envelope.id.clear();
        match result {
            Ok(()) => {
                info!(report_id = %request.report_id, "report closed");
                Ok(())
            }
            Err(e) => {
                warn!(report_id = %request.report_id, error = %e, "report close failed");
                Err(record(logs, e.into()))
            }
        }
    }

    fn update(&self, content: String, logs: &mut Vec<String>) -> Result<(), ReportError> {
        let request = UpdateRequest {
            report_id: self.envelope.id.clone(),
            base_url: self.envelope.collector_base_url.clone(),
            content,
            trust_bundle_path: self.envelope.trust_bundle().map(ToString::to_string),
            timeout: self.envelope.timeout,
        };
        debug!(report_id = %request.report_id, bytes = request.content.len(), "submitting measurement");

        self.collector.update(&request, logs).map_err(|e| {
            warn!(report_id = %request.report_id, error = %e, "measurement submission failed");
            record(logs, e.into())
        })?;
        info!(report_id = %request.report_id, "measurement submitted");
        Ok(())
    }
}

impl Drop for ReportLifecycle {
    fn drop(&mut self) {
        if self.envelope.is_open() {
            let mut logs = Vec::new();
            // Nobody is left to observe the outcome.
            let _ = self.close(&mut logs);
        }
    }
}
