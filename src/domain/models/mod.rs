pub mod clock;
pub mod config;
pub mod envelope;
pub mod measurement;

pub use clock::{format_timestamp, ClockSource, TIMESTAMP_FORMAT};
pub use config::{
    CollectorConfig, Config, DiscoveryConfig, GeoConfig, LoggingConfig, MeasurementConfig,
    SoftwareConfig,
};
pub use envelope::{ReportEnvelope, DEFAULT_TIMEOUT};
pub use measurement::MeasurementRecord;
