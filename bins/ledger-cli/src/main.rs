//! `ledger`: run one confirmation epoch over a scenario file.
//!
//! `ledger run` reads a pool snapshot and a candidate batch, confirms the
//! batch, and prints the fee-ordered confirmations with the updated pool.
//! `ledger demo` writes a signed sample scenario to start from.

mod config;
mod scenario;

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use config::{LogFormat, RunConfig};
use scenario::Scenario;

/// Confirm a batch of UTXO transactions, highest fee first.
#[derive(Parser, Debug)]
#[command(name = "ledger", version, about = "Validate and confirm a batch of UTXO transactions")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Write output to this file instead of stdout
    #[arg(long, short, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one epoch over a scenario file.
    Run {
        /// Scenario JSON: `{ "pool": [...], "candidates": [...] }`
        #[arg(long, short)]
        scenario: PathBuf,
    },
    /// Write a signed demo scenario.
    Demo,
}

impl Cli {
    /// Split CLI args into the shared RunConfig and the subcommand.
    fn into_config(self) -> (RunConfig, Command) {
        let config = RunConfig {
            log_level: self.log_level,
            log_format: self.log_format,
            pretty: self.pretty,
            out: self.out,
        };
        (config, self.command)
    }
}

fn main() {
    let (config, command) = Cli::parse().into_config();

    init_logging(&config.log_level, config.log_format);

    if let Err(e) = execute(&config, command) {
        error!("{e:#}");
        process::exit(1);
    }
}

fn execute(config: &RunConfig, command: Command) -> Result<()> {
    let output = match command {
        Command::Run { scenario } => {
            info!(path = %scenario.display(), "loading scenario");
            let scenario = Scenario::load(&scenario)?;
            info!(
                utxos = scenario.pool.len(),
                candidates = scenario.candidates.len(),
                "running epoch"
            );
            config.to_json(&scenario.run())?
        }
        Command::Demo => config.to_json(&scenario::demo()?)?,
    };

    match &config.out {
        Some(path) => {
            std::fs::write(path, output + "\n")
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => println!("{output}"),
    }
    Ok(())
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Logs go to stderr so stdout carries only JSON output.
fn init_logging(level_str: &str, format: LogFormat) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_str));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
