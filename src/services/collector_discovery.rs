use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::error::record;
use crate::domain::models::ReportEnvelope;
use crate::domain::ports::{Discovery, DiscoveryError};
use crate::domain::ReportError;

/// Picks a collector for a test by asking the discovery service.
pub struct CollectorDiscovery {
    discovery: Arc<dyn Discovery>,
}

impl CollectorDiscovery {
    /// Discovery backed by the given discovery service.
    pub fn new(discovery: Arc<dyn Discovery>) -> Self {
        Self { discovery }
    }

    /// Return the base URL of a collector accepting `test_name`/`test_version`.
    ///
    /// When several collectors are available one is picked at random to
    /// spread load; the result is always one of the returned candidates.
    pub fn discover(
        &self,
        test_name: &str,
        test_version: &str,
        discovery_base_url: Option<&str>,
        logs: &mut Vec<String>,
    ) -> Result<String, ReportError> {
        if test_name.is_empty() {
            return Err(record(
                logs,
                ReportError::validation("Please, initialize the test_name"),
            ));
        }
        if test_version.is_empty() {
            return Err(record(
                logs,
                ReportError::validation("Please, initialize the test_version"),
            ));
        }

        debug!(test_name, test_version, ?discovery_base_url, "listing collectors");
        let candidates = self
            .discovery
            .list_collectors(test_name, test_version, discovery_base_url, logs)
            .map_err(|e| {
                warn!(error = %e, "collector discovery failed");
                record(logs, e.into())
            })?;

        let Some(chosen) = candidates.choose(&mut rand::thread_rng()) else {
            warn!(test_name, test_version, "no collectors available");
            return Err(record(logs, DiscoveryError::NoCollectors.into()));
        };
        info!(collector = %chosen, available = candidates.len(), "collector selected");
        Ok(chosen.clone())
    }

    /// Discover a collector for the envelope's test and store it as the
    /// envelope's `collector_base_url`.
    pub fn discover_into(
        &self,
        envelope: &mut ReportEnvelope,
        logs: &mut Vec<String>,
    ) -> Result<(), ReportError> {
        let url = self.discover(
            &envelope.test_name,
            &envelope.test_version,
            envelope.discovery_url(),
            logs,
        )?;
        envelope.collector_base_url = url;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ListDiscovery {
        result: Result<Vec<String>, String>,
        calls: AtomicUsize,
    }

    impl ListDiscovery {
        fn ok(urls: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                result: Ok(urls.iter().map(ToString::to_string).collect()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                result: Err("HTTP 404".to_string()),
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl Discovery for ListDiscovery {
        fn list_collectors(
            &self,
            _test_name: &str,
            _test_version: &str,
            _base_url: Option<&str>,
            _logs: &mut Vec<String>,
        ) -> Result<Vec<String>, DiscoveryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .clone()
                .map_err(DiscoveryError::Unavailable)
        }
    }

    #[test]
    fn test_empty_test_name() {
        let fake = ListDiscovery::ok(&["https://c.example"]);
        let discovery = CollectorDiscovery::new(fake.clone());
        let mut logs = Vec::new();
        let err = discovery.discover("", "0.0.1", None, &mut logs).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
        assert_eq!(logs.len(), 1);
    }

    #[test]
    fn test_empty_test_version() {
        let fake = ListDiscovery::ok(&["https://c.example"]);
        let discovery = CollectorDiscovery::new(fake.clone());
        let mut logs = Vec::new();
        assert!(discovery.discover("dummy", "", None, &mut logs).is_err());
        assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_query_failure() {
        let discovery = CollectorDiscovery::new(ListDiscovery::failing());
        let mut logs = Vec::new();
        let err = discovery
            .discover("dummy", "0.0.1", None, &mut logs)
            .unwrap_err();
        assert!(matches!(err, ReportError::Discovery(_)));
    }

    #[test]
    fn test_no_collectors() {
        let discovery = CollectorDiscovery::new(ListDiscovery::ok(&[]));
        let mut logs = Vec::new();
        let err = discovery
            .discover("dummy", "0.0.1", None, &mut logs)
            .unwrap_err();
        assert_eq!(err.to_string(), "Discovery failed: No collectors available");
    }

    #[test]
    fn test_discover_into_sets_collector() {
        let discovery = CollectorDiscovery::new(ListDiscovery::ok(&["https://c.example"]));
        let mut envelope = ReportEnvelope {
            test_name: "dummy".to_string(),
            test_version: "0.0.1".to_string(),
            ..Default::default()
        };
        let mut logs = Vec::new();
        discovery.discover_into(&mut envelope, &mut logs).unwrap();
        assert_eq!(envelope.collector_base_url, "https://c.example");
    }
}
