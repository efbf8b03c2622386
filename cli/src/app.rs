//! Core application

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use post_stats::{CountingCalculator, StatisticsNode};

use crate::core::cli::{self, CliConfig};
use crate::core::config::AppConfig;
use crate::core::constants::{DEFAULT_LOG_FILTER, ENV_LOG};
use crate::data::{open_input, read_posts, write_result};

pub struct CoreApp {
    pub config: AppConfig,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let cli_config = cli::parse();
        let app = Self::init(&cli_config)?;
        app.execute()
    }

    fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;
        Ok(Self { config })
    }

    fn execute(&self) -> Result<()> {
        tracing::debug!(input = %self.config.input, "Reading posts");
        let input = open_input(&self.config.input)?;
        let stats = self.calculate(input)?;
        write_result(&stats, self.config.output.pretty, io::stdout().lock())
    }

    /// Feed every post from `input` through a counting calculator
    pub fn calculate<R: BufRead>(&self, input: R) -> Result<StatisticsNode> {
        let mut calculator = CountingCalculator::with_parameters(self.config.parameters());

        let summary = read_posts(input, |post| {
            calculator
                .accumulate(&post)
                .context("Failed to accumulate post")
        })?;

        let stats = calculator
            .calculate()
            .context("Failed to calculate statistics")?;

        tracing::info!(
            records = summary.records,
            skipped = summary.skipped,
            included = calculator.accepted(),
            excluded = calculator.rejected(),
            authors = calculator.policy().totals().len(),
            "Posts processed"
        );

        Ok(stats)
    }

    fn init_logging() {
        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .with_writer(io::stderr)
            .compact()
            .with_env_filter(filter)
            .init();
    }
}
