//! Collector discovery command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::static_discovery;
use crate::cli::output::{output, print_diagnostics, CommandOutput};
use crate::domain::models::Config;
use crate::services::CollectorDiscovery;

#[derive(Args, Debug)]
pub struct DiscoverArgs {
    /// Name of the test the collector must accept
    #[arg(long)]
    pub test_name: String,

    /// Version of the test
    #[arg(long)]
    pub test_version: String,
}

#[derive(Debug, Serialize)]
pub struct DiscoverOutput {
    pub collector: String,
    pub logs: Vec<String>,
}

impl CommandOutput for DiscoverOutput {
    fn to_human(&self) -> String {
        self.collector.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: DiscoverArgs, config: &Config, json_mode: bool) -> Result<()> {
    let discovery = CollectorDiscovery::new(static_discovery(config));
    let mut logs = Vec::new();

    let result = discovery.discover(
        &args.test_name,
        &args.test_version,
        config.discovery.base_url.as_deref(),
        &mut logs,
    );
    print_diagnostics(&logs, json_mode && result.is_ok());

    output(
        &DiscoverOutput {
            collector: result?,
            logs,
        },
        json_mode,
    );
    Ok(())
}
