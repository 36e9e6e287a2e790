use thiserror::Error;

/// Errors returned by a [`Discovery`] implementation.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The discovery service could not be queried.
    #[error("Discovery service unavailable: {0}")]
    Unavailable(String),

    /// The query succeeded but no collector serves the requested test.
    #[error("No collectors available")]
    NoCollectors,
}

/// Service mapping a test identity to the collectors accepting its reports.
pub trait Discovery: Send + Sync {
    /// List the base URLs of collectors accepting `test_name`/`test_version`.
    ///
    /// `base_url` overrides the implementation's default discovery endpoint.
    fn list_collectors(
        &self,
        test_name: &str,
        test_version: &str,
        base_url: Option<&str>,
        logs: &mut Vec<String>,
    ) -> Result<Vec<String>, DiscoveryError>;
}
