//! Measurement resubmission command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use super::{http_collector, static_discovery};
use crate::cli::output::{output, print_diagnostics, CommandOutput};
use crate::domain::models::Config;
use crate::services::Resubmitter;

#[derive(Args, Debug)]
pub struct ResubmitArgs {
    /// File holding one serialized measurement document
    pub measurement: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ResubmitOutput {
    pub report_id: String,
    pub logs: Vec<String>,
}

impl CommandOutput for ResubmitOutput {
    fn to_human(&self) -> String {
        format!("Resubmitted measurement\nReport ID: {}", self.report_id)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: ResubmitArgs, config: &Config, json_mode: bool) -> Result<()> {
    let serialized = std::fs::read_to_string(&args.measurement).with_context(|| {
        format!("Failed to read measurement from {}", args.measurement.display())
    })?;

    let mut resubmitter = Resubmitter::new(http_collector()?, static_discovery(config));
    if let Some(ref url) = config.discovery.base_url {
        resubmitter = resubmitter.with_discovery_base_url(url.clone());
    }

    let mut logs = Vec::new();
    let result = resubmitter.resubmit(
        &serialized,
        config.collector.trust_bundle_path.as_deref(),
        config.collector.timeout(),
        &mut logs,
    );
    print_diagnostics(&logs, json_mode && result.is_ok());

    output(
        &ResubmitOutput {
            report_id: result?,
            logs,
        },
        json_mode,
    );
    Ok(())
}
