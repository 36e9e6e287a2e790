//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::discover::DiscoverArgs;
use super::commands::resubmit::ResubmitArgs;
use super::commands::submit::SubmitArgs;

#[derive(Parser, Debug)]
#[command(name = "probe-report")]
#[command(about = "Submit network measurements to a collector", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to probe-report.yaml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a report, submit one measurement into it, and close it
    Submit(SubmitArgs),

    /// Replay a serialized measurement into a new report
    Resubmit(ResubmitArgs),

    /// Print the collector that would receive reports for a test
    Discover(DiscoverArgs),
}
