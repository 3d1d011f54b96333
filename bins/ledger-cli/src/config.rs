//! Run configuration for the `ledger` binary.

use std::path::PathBuf;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event, for log aggregation pipelines.
    Json,
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Log level filter string (e.g. "info", "debug", "ledger_core=trace").
    /// `RUST_LOG` takes precedence when set.
    pub log_level: String,
    pub log_format: LogFormat,
    /// Pretty-print JSON written to stdout or files.
    pub pretty: bool,
    /// Where to write output. `None` means stdout.
    pub out: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            pretty: false,
            out: None,
        }
    }
}

impl RunConfig {
    /// Serialize `value` according to the `pretty` setting.
    pub fn to_json<T: serde::Serialize>(&self, value: &T) -> serde_json::Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
    }
}
