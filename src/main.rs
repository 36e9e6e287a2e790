//! probe-report CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use probe_report::cli::commands::{discover, resubmit, submit};
use probe_report::cli::{handle_error, Cli, Commands};
use probe_report::infrastructure::config::ConfigLoader;
use probe_report::infrastructure::logging::{LogConfig, LoggerImpl};

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli.command, cli.config.as_deref(), cli.json) {
        handle_error(err, cli.json);
    }
}

fn run(command: Commands, config_path: Option<&Path>, json_mode: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    // Keeps the file writer flushing until the command finishes
    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;

    match command {
        Commands::Submit(args) => submit::execute(args, &config, json_mode),
        Commands::Resubmit(args) => resubmit::execute(args, &config, json_mode),
        Commands::Discover(args) => discover::execute(args, &config, json_mode),
    }
}
