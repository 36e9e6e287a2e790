use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::envelope::ReportEnvelope;

/// Main configuration structure for the report client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Identity of the software producing measurements
    #[serde(default)]
    pub software: SoftwareConfig,

    /// Collector connection settings
    #[serde(default)]
    pub collector: CollectorConfig,

    /// Collector discovery settings
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Geo database locations
    #[serde(default)]
    pub geo: GeoConfig,

    /// Measurement document options
    #[serde(default)]
    pub measurement: MeasurementConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Envelope pre-filled with everything the configuration knows.
    ///
    /// Probe location and test identity are left for the caller.
    pub fn envelope_template(&self) -> ReportEnvelope {
        ReportEnvelope {
            software_name: self.software.name.clone(),
            software_version: self.software.version.clone(),
            collector_base_url: self.collector.base_url.clone(),
            trust_bundle_path: self.collector.trust_bundle_path.clone().unwrap_or_default(),
            timeout: self.collector.timeout(),
            discovery_base_url: self.discovery.base_url.clone().unwrap_or_default(),
            asn_db_path: self.geo.asn_db_path.clone().unwrap_or_default(),
            country_db_path: self.geo.country_db_path.clone().unwrap_or_default(),
            ..ReportEnvelope::default()
        }
    }
}

/// Software identity reported with every measurement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SoftwareConfig {
    #[serde(default = "default_software_name")]
    pub name: String,

    #[serde(default = "default_software_version")]
    pub version: String,
}

fn default_software_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_software_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for SoftwareConfig {
    fn default() -> Self {
        Self {
            name: default_software_name(),
            version: default_software_version(),
        }
    }
}

/// Collector connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CollectorConfig {
    /// Collector base URL; empty means discover one
    #[serde(default)]
    pub base_url: String,

    /// CA bundle used to validate the collector certificate
    #[serde(default)]
    pub trust_bundle_path: Option<String>,

    /// Timeout for each collector call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    30
}

impl CollectorConfig {
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            trust_bundle_path: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Collector discovery settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DiscoveryConfig {
    /// Discovery service base URL
    #[serde(default)]
    pub base_url: Option<String>,

    /// Collectors offered by static discovery
    #[serde(default)]
    pub collectors: Vec<String>,
}

/// Geo database locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GeoConfig {
    #[serde(default)]
    pub asn_db_path: Option<String>,

    #[serde(default)]
    pub country_db_path: Option<String>,
}

/// Measurement document options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MeasurementConfig {
    /// Resolver address injected into the test keys (null when unset)
    #[serde(default)]
    pub client_resolver: Option<String>,

    /// Fixed document id (a fresh UUID per document when unset)
    #[serde(default)]
    pub document_id: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Log file rotation: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
