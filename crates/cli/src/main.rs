//! wdctl - show the status of the hardware watchdog
//!
//! Opens the watchdog device just long enough to read its identity, status
//! and timeouts, disarms it again, and prints a flags table.

#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod output;

use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wdctl_core::prelude::*;
use wdctl_device::{DeviceResult, QueryOutcome, query_device};

const DEFAULT_LOG_FILTER: &str = "wdctl=warn,wdctl_device=warn,wdctl_core=warn";

#[derive(Parser, Debug)]
#[command(name = "wdctl")]
#[command(about = "Show the status of the hardware watchdog.")]
#[command(version)]
#[command(args_override_self = true)]
#[command(after_help = output::columns_help())]
struct Cli {
    /// Device to use
    #[arg(
        short = 'd',
        long,
        value_name = "path",
        env = "WDCTL_DEVICE",
        default_value = DEFAULT_DEVICE
    )]
    device: String,

    /// Print selected flags only
    #[arg(short = 'f', long, value_name = "list", conflicts_with = "noflags")]
    flags: Option<String>,

    /// Don't print information about flags
    #[arg(short = 'F', long)]
    noflags: bool,

    /// Don't print watchdog identity information
    #[arg(short = 'I', long)]
    noident: bool,

    /// Don't print watchdog timeouts
    #[arg(short = 'T', long)]
    notimeouts: bool,

    /// Don't print headings for flags table
    #[arg(short = 'n', long)]
    noheadings: bool,

    /// Define the table columns
    #[arg(short = 'o', long, value_name = "list")]
    output: Option<String>,

    /// Use key="value" output format
    #[arg(short = 'P', long)]
    pairs: bool,

    /// Use raw output format for flags table
    #[arg(short = 'r', long)]
    raw: bool,

    /// Use JSON output format
    #[arg(short = 'J', long)]
    json: bool,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.pairs {
            OutputMode::Pairs
        } else if self.raw {
            OutputMode::Raw
        } else {
            OutputMode::Normal
        }
    }

    /// Resolve the selection options. Runs before the device is touched.
    fn display_options(&self, term_width: usize) -> Result<DisplayOptions, CoreError> {
        let mut options = DisplayOptions {
            identity: !self.noident,
            timeouts: !self.notimeouts,
            flags: !self.noflags,
            ..DisplayOptions::default()
        };
        if let Some(list) = &self.flags {
            options.filter = FlagFilter::parse(list)?;
        }
        if let Some(list) = &self.output {
            options.columns = ColumnSelection::parse(list)?;
        }
        options.table.mode = self.output_mode();
        options.table.headings = !self.noheadings;
        options.table.term_width = term_width;
        Ok(options)
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_ansi(io::stderr().is_terminal())
                .with_writer(io::stderr),
        )
        .init();
}

/// Query the device and print everything the options ask for.
fn run<Q, W>(cli: &Cli, term_width: usize, query: Q, out: &mut W) -> Result<()>
where
    Q: FnOnce(&str) -> DeviceResult<QueryOutcome>,
    W: Write,
{
    let options = cli.display_options(term_width)?;

    let outcome = query(&cli.device)?;
    for warning in &outcome.warnings {
        warn!("{warning}");
    }

    let warnings = print_snapshot(&outcome.snapshot, &options, out)?;
    for warning in &warnings {
        warn!("{warning}");
    }

    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version go to stdout and are not failures.
            let failed = err.use_stderr();
            if err.print().is_err() || failed {
                return ExitCode::FAILURE;
            }
            return ExitCode::SUCCESS;
        }
    };

    output::configure_colors();
    init_tracing();

    let stdout = io::stdout();
    let result = run(
        &cli,
        wdctl_table::terminal_width(),
        query_device,
        &mut stdout.lock(),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error_human(&e);
            ExitCode::FAILURE
        }
    }
}
