//! Source runner - maps protocol commands onto a source's lifecycle
//!
//! The runner owns nothing but the source and the messenger. Each command is
//! answered on the messenger (SPEC, CONNECTION_STATUS, CATALOG, RECORDs) and
//! any failure is returned so the caller can exit with a failure status.

use crate::error::{ConnectorError, Result};
use crate::traits::catalog::ConfiguredCatalog;
use crate::traits::message::{ConnectionStatus, LogLevel};
use crate::traits::messenger::Messenger;
use crate::traits::source::Source;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// A lifecycle command issued by the orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Describe the configuration form
    Spec,
    /// Validate connectivity and configuration
    Check { config: PathBuf },
    /// List available streams
    Discover { config: PathBuf },
    /// Extract the configured streams
    Read {
        config: PathBuf,
        catalog: PathBuf,
        state: Option<PathBuf>,
    },
}

impl Command {
    /// Command name as used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::Spec => "spec",
            Self::Check { .. } => "check",
            Self::Discover { .. } => "discover",
            Self::Read { .. } => "read",
        }
    }
}

/// Load a configured catalog from a JSON file
pub async fn load_configured_catalog(path: &Path) -> Result<ConfiguredCatalog> {
    let raw = tokio::fs::read(path)
        .await
        .map_err(|e| ConnectorError::config_load(path, e))?;
    serde_json::from_slice(&raw).map_err(|e| ConnectorError::config_load(path, e))
}

/// Runs lifecycle commands against a source
pub struct SourceRunner<S, M> {
    source: S,
    messenger: M,
}

impl<S: Source, M: Messenger> SourceRunner<S, M> {
    /// Create a runner
    pub fn new(source: S, messenger: M) -> Self {
        Self { source, messenger }
    }

    /// The messenger commands answer on
    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Run one command to completion
    pub async fn run(&self, command: &Command) -> Result<()> {
        let started = Instant::now();
        info!(command = command.name(), "Running command");

        let result = match command {
            Command::Spec => self.spec().await,
            Command::Check { config } => self.check(config).await,
            Command::Discover { config } => self.discover(config).await,
            Command::Read {
                config,
                catalog,
                state,
            } => self.read(config, catalog, state.as_deref()).await,
        };

        match &result {
            Ok(()) => info!(
                command = command.name(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Command finished"
            ),
            Err(e) => error!(command = command.name(), "Command failed: {}", e),
        }
        result
    }

    async fn spec(&self) -> Result<()> {
        let spec = self.source.spec()?;
        self.messenger.write_spec(spec).await
    }

    async fn check(&self, config: &Path) -> Result<()> {
        match self.source.check(config, &self.messenger).await {
            Ok(()) => {
                self.messenger
                    .write_connection_status(ConnectionStatus::succeeded())
                    .await
            }
            Err(e) => {
                // The check error is what gets reported
                if let Err(write_err) = self
                    .messenger
                    .write_connection_status(ConnectionStatus::failed(e.to_string()))
                    .await
                {
                    warn!("Failed to write connection status: {}", write_err);
                }
                Err(e)
            }
        }
    }

    async fn discover(&self, config: &Path) -> Result<()> {
        let catalog = self.source.discover(config, &self.messenger).await?;
        debug!(streams = catalog.streams.len(), "Discovered catalog");
        self.messenger.write_catalog(catalog).await
    }

    async fn read(&self, config: &Path, catalog: &Path, state: Option<&Path>) -> Result<()> {
        let catalog = load_configured_catalog(catalog).await?;
        let result = self
            .source
            .read(config, state, &catalog, &self.messenger)
            .await;

        if let Err(ref e) = result {
            // Best effort: the read error is what gets reported
            let _ = self
                .messenger
                .write_log(LogLevel::Error, &format!("read failed: {}", e))
                .await;
        }
        result
    }
}
