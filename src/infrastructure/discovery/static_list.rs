use tracing::debug;

use crate::domain::ports::{Discovery, DiscoveryError};

/// Discovery answering every query with a fixed, configured collector list.
///
/// Useful when the collector set is known ahead of time, or to pin a single
/// collector. An empty list yields zero candidates.
#[derive(Debug, Clone, Default)]
pub struct StaticDiscovery {
    collectors: Vec<String>,
}

impl StaticDiscovery {
    pub fn new(collectors: Vec<String>) -> Self {
        Self { collectors }
    }

    pub fn collectors(&self) -> &[String] {
        &self.collectors
    }
}

impl Discovery for StaticDiscovery {
    fn list_collectors(
        &self,
        test_name: &str,
        test_version: &str,
        base_url: Option<&str>,
        logs: &mut Vec<String>,
    ) -> Result<Vec<String>, DiscoveryError> {
        if let Some(url) = base_url {
            debug!(url, "static discovery ignores the discovery base URL");
        }
        logs.push(format!(
            "Using {} configured collector(s) for {test_name} {test_version}",
            self.collectors.len()
        ));
        Ok(self.collectors.clone())
    }
}
