pub mod collector_discovery;
pub mod envelope_builder;
pub mod geo_discovery;
pub mod report_lifecycle;
pub mod resubmitter;
pub mod validator;

pub use collector_discovery::CollectorDiscovery;
pub use envelope_builder::{EnvelopeBuilder, CLIENT_RESOLVER_KEY, DATA_FORMAT_VERSION};
pub use geo_discovery::{GeoDiscovery, ProbeLocation};
pub use report_lifecycle::{ReportLifecycle, ReportState};
pub use resubmitter::Resubmitter;
pub use validator::Validator;
