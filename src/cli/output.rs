//! Output formatting utilities for the CLI.

use serde::Serialize;

pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;
    fn to_json(&self) -> serde_json::Value;
}

pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

/// Echo the diagnostic lines collected by a service call on stderr.
///
/// `quiet` is set when the lines travel in the JSON command output instead.
pub fn print_diagnostics(logs: &[String], quiet: bool) {
    if quiet {
        return;
    }
    for line in logs {
        eprintln!("  | {line}");
    }
}
