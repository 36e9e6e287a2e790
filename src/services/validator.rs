use crate::domain::models::ReportEnvelope;
use crate::domain::ReportError;

/// Mandatory-field checks gating each lifecycle operation.
///
/// Checks run in a fixed order and stop at the first failure, so the
/// returned error always names the earliest missing precondition.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    /// Preconditions of `open`: no report open, every identity field set.
    pub fn check_open(envelope: &ReportEnvelope) -> Result<(), ReportError> {
        if envelope.is_open() {
            return Err(ReportError::validation("A report is already open"));
        }
        let mandatory = [
            ("probe_asn", &envelope.probe_asn),
            ("probe_cc", &envelope.probe_cc),
            ("software_name", &envelope.software_name),
            ("software_version", &envelope.software_version),
            ("test_name", &envelope.test_name),
            ("test_version", &envelope.test_version),
            ("test_start_time", &envelope.test_start_time),
            ("collector_base_url", &envelope.collector_base_url),
        ];
        for (field, value) in mandatory {
            if value.is_empty() {
                return Err(ReportError::validation(format!(
                    "Please, initialize the {field}"
                )));
            }
        }
        Ok(())
    }

    /// Preconditions of `submit` and `close`: a report is open and the
    /// collector is known.
    pub fn check_open_report(envelope: &ReportEnvelope) -> Result<(), ReportError> {
        if !envelope.is_open() {
            return Err(ReportError::validation("No configured report ID."));
        }
        if envelope.collector_base_url.is_empty() {
            return Err(ReportError::validation("No configured collector_base_url."));
        }
        Ok(())
    }
}
