//! Diagnostics and help text for the wdctl CLI

use std::io::IsTerminal;

use anyhow::Error;
use colored::Colorize;
use wdctl_core::{COLUMNS, CoreError};

const PROGRAM: &str = "wdctl";

/// Turn colour off when stderr is not a terminal.
pub fn configure_colors() {
    if !std::io::stderr().is_terminal() {
        colored::control::set_override(false);
    }
}

/// Diagnostic lines for a fatal error, without the program prefix.
///
/// Unknown flag and column names get one line each.
pub fn error_lines(error: &Error) -> Vec<String> {
    match error.downcast_ref::<CoreError>() {
        Some(CoreError::UnknownFlag(names)) => names
            .iter()
            .map(|name| format!("unknown flag: {name}"))
            .collect(),
        Some(CoreError::UnknownColumn(names)) => names
            .iter()
            .map(|name| format!("unknown column: {name}"))
            .collect(),
        _ => vec![error.to_string()],
    }
}

/// Print a fatal error to stderr.
pub fn print_error_human(error: &Error) {
    let prefix = format!("{PROGRAM}:");
    for line in error_lines(error) {
        eprintln!("{} {line}", prefix.red().bold());
    }
}

/// The "Available columns" section appended to `--help`.
pub fn columns_help() -> String {
    let mut help = String::from("Available columns:\n");
    for column in &COLUMNS {
        help.push_str(&format!(" {:>13}  {}\n", column.name, column.help));
    }
    help
}
