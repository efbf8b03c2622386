use clap::Parser;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use post_stats::utils::time::parse_timestamp;

use super::constants::{
    APP_NAME, ENV_COMPACT, ENV_CONFIG, ENV_END, ENV_INPUT, ENV_START, ENV_STAT_NAME,
};

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(
    version,
    about = "Per-author post statistics over JSON Lines post records",
    long_about = None
)]
pub struct Cli {
    /// JSON Lines file with one post per line ("-" reads stdin)
    #[arg(long, short = 'i', env = ENV_INPUT)]
    pub input: Option<PathBuf>,

    /// Stat name label copied onto every result node
    #[arg(long, short = 's', env = ENV_STAT_NAME)]
    pub stat_name: Option<String>,

    /// Inclusive range start (RFC 3339 or YYYY-MM-DD)
    #[arg(long, env = ENV_START, value_parser = parse_date_bound)]
    pub start: Option<DateTime<Utc>>,

    /// Inclusive range end (RFC 3339 or YYYY-MM-DD)
    #[arg(long, env = ENV_END, value_parser = parse_date_bound)]
    pub end: Option<DateTime<Utc>>,

    /// Print the result on a single line
    #[arg(long, env = ENV_COMPACT)]
    pub compact: bool,

    /// Path to config file
    #[arg(long, short = 'c', env = ENV_CONFIG)]
    pub config: Option<PathBuf>,
}

/// Parse a range bound from CLI/env string
fn parse_date_bound(s: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(s).map_err(|e| e.to_string())
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub input: Option<PathBuf>,
    pub stat_name: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub compact: bool,
    pub config: Option<PathBuf>,
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            stat_name: cli.stat_name,
            start: cli.start,
            end: cli.end,
            compact: cli.compact,
            config: cli.config,
        }
    }
}

/// Parse CLI arguments
pub fn parse() -> CliConfig {
    Cli::parse().into()
}
