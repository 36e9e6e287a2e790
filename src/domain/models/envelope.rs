use std::collections::BTreeMap;
use std::time::Duration;

/// Default timeout applied to each collaborator call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Identity and metadata of a report, plus the id assigned by the collector.
///
/// `id` is empty while no report is open. A non-empty `id` is the capability
/// required to submit into or close the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEnvelope {
    /// Optional annotations attached to every measurement.
    pub annotations: BTreeMap<String, String>,

    /// Probe autonomous system number, e.g. `AS30722`.
    pub probe_asn: String,

    /// Probe two-letter country code, e.g. `IT`.
    pub probe_cc: String,

    /// Name of the application producing the measurements.
    pub software_name: String,

    /// Version of the application producing the measurements.
    pub software_version: String,

    /// Name of the network test.
    pub test_name: String,

    /// Version of the network test.
    pub test_version: String,

    /// Time the test started, in the collector timestamp format.
    pub test_start_time: String,

    /// Base URL of the discovery service.
    pub discovery_base_url: String,

    /// Base URL of the collector.
    pub collector_base_url: String,

    /// Path to the CA bundle used to validate the collector certificate.
    pub trust_bundle_path: String,

    /// Path to the ASN geo database.
    pub asn_db_path: String,

    /// Path to the country geo database.
    pub country_db_path: String,

    /// Report id assigned by the collector on open.
    pub id: String,

    /// Timeout bounding each collaborator call.
    pub timeout: Duration,
}

impl Default for ReportEnvelope {
    fn default() -> Self {
        Self {
            annotations: BTreeMap::new(),
            probe_asn: String::new(),
            probe_cc: String::new(),
            software_name: String::new(),
            software_version: String::new(),
            test_name: String::new(),
            test_version: String::new(),
            test_start_time: String::new(),
            discovery_base_url: String::new(),
            collector_base_url: String::new(),
            trust_bundle_path: String::new(),
            asn_db_path: String::new(),
            country_db_path: String::new(),
            id: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ReportEnvelope {
    /// Create an empty envelope with the default timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a report is currently open with the collector.
    pub fn is_open(&self) -> bool {
        !self.id.is_empty()
    }

    /// Trust bundle path, or `None` when unset.
    pub fn trust_bundle(&self) -> Option<&str> {
        non_empty(&self.trust_bundle_path)
    }

    /// Discovery base URL, or `None` when unset.
    pub fn discovery_url(&self) -> Option<&str> {
        non_empty(&self.discovery_base_url)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
