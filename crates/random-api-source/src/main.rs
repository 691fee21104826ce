//! source-random-api - Random Data API source connector
//!
//! Protocol messages go to stdout, diagnostics to stderr.
//!
//! # Usage
//!
//! ```bash
//! source-random-api spec
//! source-random-api check --config config.json
//! source-random-api discover --config config.json
//! source-random-api read --config config.json --catalog catalog.json [--state state.json]
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use random_api_source::connectors::random_api::{
    RandomApiSource, RecordFetcher, DEFAULT_BASE_URL, DEFAULT_READ_CONCURRENCY,
};
use random_api_source::{Command, SourceRunner, StdoutMessenger};
use std::path::PathBuf;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "source-random-api")]
#[command(version, about = "Source connector for the Random Data API")]
struct Cli {
    /// Base URL of the Random Data API
    #[arg(long, env = "RANDOM_API_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Number of streams extracted at the same time during read
    #[arg(long, default_value_t = DEFAULT_READ_CONCURRENCY, global = true)]
    concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the connector specification
    Spec,
    /// Check connectivity and validate the configuration
    Check {
        /// Path to the source configuration
        #[arg(long)]
        config: PathBuf,
    },
    /// Print the catalog of available streams
    Discover {
        /// Path to the source configuration
        #[arg(long)]
        config: PathBuf,
    },
    /// Extract the configured streams
    Read {
        /// Path to the source configuration
        #[arg(long)]
        config: PathBuf,
        /// Path to the configured catalog
        #[arg(long)]
        catalog: PathBuf,
        /// Path to the previous state (unused, full refresh only)
        #[arg(long)]
        state: Option<PathBuf>,
    },
}

impl From<Commands> for Command {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Spec => Command::Spec,
            Commands::Check { config } => Command::Check { config },
            Commands::Discover { config } => Command::Discover { config },
            Commands::Read {
                config,
                catalog,
                state,
            } => Command::Read {
                config,
                catalog,
                state,
            },
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let fetcher = RecordFetcher::with_timeout(&cli.base_url, Duration::from_secs(cli.timeout_secs))
        .context("Failed to create HTTP client")?;
    let source = RandomApiSource::from_fetcher(fetcher)
        .context("Failed to create source")?
        .read_concurrency(cli.concurrency);

    let runner = SourceRunner::new(source, StdoutMessenger::stdout());
    let command = Command::from(cli.command);

    if let Err(e) = runner.run(&command).await {
        error!("{} failed: {}", command.name(), e);
        return Err(e).with_context(|| format!("{} failed", command.name()));
    }
    Ok(())
}
