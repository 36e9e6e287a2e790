//! Measurement submission command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::{envelope_builder, http_collector, static_discovery};
use crate::cli::output::{output, print_diagnostics, CommandOutput};
use crate::domain::models::{ClockSource, Config, MeasurementRecord, ReportEnvelope};
use crate::services::{CollectorDiscovery, ReportLifecycle};

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// File holding the test keys JSON object ("-" reads stdin)
    pub test_keys: PathBuf,

    /// Name of the test that produced the measurement
    #[arg(long)]
    pub test_name: String,

    /// Version of the test
    #[arg(long)]
    pub test_version: String,

    /// Probe autonomous system, e.g. AS30722
    #[arg(long)]
    pub probe_asn: String,

    /// Probe country code, e.g. IT
    #[arg(long)]
    pub probe_cc: String,

    /// Measurement input (URL, hostname, ...)
    #[arg(long, default_value = "")]
    pub input: String,

    /// Measurement start time; defaults to now
    #[arg(long)]
    pub start_time: Option<String>,

    /// Measurement runtime in seconds
    #[arg(long, default_value_t = 0.0, value_parser = parse_runtime)]
    pub runtime: f64,

    /// Report annotation as KEY=VALUE (repeatable)
    #[arg(long = "annotation", value_parser = parse_annotation)]
    pub annotations: Vec<(String, String)>,
}

#[derive(Debug, Serialize)]
pub struct SubmitOutput {
    pub report_id: String,
    pub collector: String,
    pub logs: Vec<String>,
}

impl CommandOutput for SubmitOutput {
    fn to_human(&self) -> String {
        format!(
            "Submitted measurement to {}\nReport ID: {}",
            self.collector, self.report_id
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: SubmitArgs, config: &Config, json_mode: bool) -> Result<()> {
    let test_keys = read_test_keys(&args.test_keys)?;

    let mut envelope = config.envelope_template();
    envelope.test_name = args.test_name.clone();
    envelope.test_version = args.test_version.clone();
    envelope.probe_asn = args.probe_asn.clone();
    envelope.probe_cc = args.probe_cc.clone();
    envelope.test_start_time = ClockSource::now_formatted();
    envelope.annotations.extend(args.annotations.iter().cloned());

    let mut measurement = MeasurementRecord::new(args.input.clone());
    measurement.start_time = args
        .start_time
        .clone()
        .unwrap_or_else(|| envelope.test_start_time.clone());
    measurement.runtime = args.runtime;
    measurement.set_test_keys(test_keys);

    let mut logs = Vec::new();
    let result = submit(config, envelope, measurement, &mut logs);
    print_diagnostics(&logs, json_mode && result.is_ok());
    let (report_id, collector) = result?;

    output(
        &SubmitOutput {
            report_id,
            collector,
            logs,
        },
        json_mode,
    );
    Ok(())
}

/// Open, fill and close one report; returns the report id and collector.
fn submit(
    config: &Config,
    mut envelope: ReportEnvelope,
    measurement: MeasurementRecord,
    logs: &mut Vec<String>,
) -> Result<(String, String)> {
    if envelope.collector_base_url.is_empty() {
        CollectorDiscovery::new(static_discovery(config)).discover_into(&mut envelope, logs)?;
    }

    let mut report =
        ReportLifecycle::new(envelope, http_collector()?).with_builder(envelope_builder(config));
    report.open(logs)?;
    let report_id = report.envelope().id.clone();
    let collector = report.envelope().collector_base_url.clone();

    report.submit(measurement, logs)?;
    report.close(logs)?;
    Ok((report_id, collector))
}

fn read_test_keys(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read test keys from stdin")?;
        return Ok(buf);
    }
    std::fs::read(path).with_context(|| format!("Failed to read test keys from {}", path.display()))
}

fn parse_runtime(raw: &str) -> Result<f64, String> {
    let runtime: f64 = raw
        .parse()
        .map_err(|_| format!("runtime '{raw}' is not a number"))?;
    if !runtime.is_finite() || runtime < 0.0 {
        return Err(format!("runtime '{raw}' must be a finite, non-negative number of seconds"));
    }
    Ok(runtime)
}

fn parse_annotation(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("annotation '{raw}' must be KEY=VALUE"))?;
    if key.is_empty() {
        return Err(format!("annotation '{raw}' has an empty key"));
    }
    Ok((key.to_string(), value.to_string()))
}
