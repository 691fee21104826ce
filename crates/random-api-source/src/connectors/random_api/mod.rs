//! Random Data API source connector
//!
//! Full-refresh source for <https://random-data-api.com/>. Every stream maps to
//! `GET {base_url}/{stream}?size={limit}`, which answers with a JSON array of
//! at most `limit` records.
//!
//! # Configuration
//!
//! ```json
//! { "limit": 10 }
//! ```
//!
//! `limit` must lie inside the connector's [`LimitBounds`] (2..=100 by
//! default).
//!
//! # Read
//!
//! Configured streams are resolved against the registry before anything is
//! fetched, so an unknown stream fails the read without emitting records.
//! Streams are then extracted concurrently (bounded by `read_concurrency`);
//! records of one stream are forwarded in response order, and the first
//! failure cancels the remaining streams.

pub mod fetcher;
pub mod streams;

pub use fetcher::{RecordFetcher, DEFAULT_REQUEST_TIMEOUT};
pub use streams::{random_api_streams, Appliance, Beer, APPLIANCES, BEERS};

use crate::config::{LimitBounds, SourceConfig};
use crate::error::{ConnectorError, Result};
use crate::registry::{StreamDefinition, StreamRegistry};
use crate::traits::catalog::{Catalog, ConfiguredCatalog, ConfiguredStream, DestinationSyncMode};
use crate::traits::message::LogLevel;
use crate::traits::messenger::Messenger;
use crate::traits::source::Source;
use crate::traits::spec::ConnectorSpec;
use async_trait::async_trait;
use futures::stream::{self, TryStreamExt};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Public Random Data API endpoint
pub const DEFAULT_BASE_URL: &str = "https://random-data-api.com/api/v2";

/// Pause after each probe in `check` to stay under the API's throttling
pub const DEFAULT_PROBE_DELAY: Duration = Duration::from_millis(200);

/// Streams extracted at the same time during `read`
pub const DEFAULT_READ_CONCURRENCY: usize = 4;

const DOCUMENTATION_URL: &str = "https://random-data-api.com/";

/// Random Data API source
#[derive(Debug, Clone)]
pub struct RandomApiSource {
    fetcher: RecordFetcher,
    registry: StreamRegistry,
    bounds: LimitBounds,
    probe_delay: Duration,
    read_concurrency: usize,
}

impl RandomApiSource {
    /// Create a source for `base_url` with the Random Data API streams
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::from_fetcher(RecordFetcher::new(base_url)?)
    }

    /// Create a source on a preconfigured fetcher (e.g. a custom request
    /// timeout) with the Random Data API streams
    pub fn from_fetcher(fetcher: RecordFetcher) -> Result<Self> {
        Ok(Self::from_parts(fetcher, random_api_streams()?))
    }

    /// Create a source for `base_url` serving the given streams
    pub fn with_registry(base_url: impl Into<String>, registry: StreamRegistry) -> Result<Self> {
        Ok(Self::from_parts(RecordFetcher::new(base_url)?, registry))
    }

    /// Create a source from a fetcher and a registry
    pub fn from_parts(fetcher: RecordFetcher, registry: StreamRegistry) -> Self {
        Self {
            fetcher,
            registry,
            bounds: LimitBounds::default(),
            probe_delay: DEFAULT_PROBE_DELAY,
            read_concurrency: DEFAULT_READ_CONCURRENCY,
        }
    }

    /// Set the allowed `limit` range
    pub fn limit_bounds(mut self, bounds: LimitBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the pause inserted after each probe in `check`
    pub fn probe_delay(mut self, delay: Duration) -> Self {
        self.probe_delay = delay;
        self
    }

    /// Set how many streams `read` extracts at once (minimum 1)
    pub fn read_concurrency(mut self, concurrency: usize) -> Self {
        self.read_concurrency = concurrency.max(1);
        self
    }

    /// Fetcher used for probes and record requests
    pub fn fetcher(&self) -> &RecordFetcher {
        &self.fetcher
    }

    /// Streams served by this source
    pub fn registry(&self) -> &StreamRegistry {
        &self.registry
    }

    /// Allowed `limit` range
    pub fn bounds(&self) -> LimitBounds {
        self.bounds
    }

    /// Resolve every configured stream before any I/O happens
    fn plan<'a>(
        &'a self,
        catalog: &'a ConfiguredCatalog,
    ) -> Result<Vec<(&'a StreamDefinition, &'a ConfiguredStream)>> {
        catalog
            .streams
            .iter()
            .map(|configured| {
                self.registry
                    .get(configured.name())
                    .map(|definition| (definition, configured))
                    .ok_or_else(|| ConnectorError::unsupported_stream(configured.name()))
            })
            .collect()
    }

    /// Fetch one stream and forward its records in response order
    async fn sync_stream(
        &self,
        definition: &StreamDefinition,
        configured: &ConfiguredStream,
        limit: i64,
        messenger: &dyn Messenger,
    ) -> Result<u64> {
        let started = Instant::now();
        let records = self.fetcher.fetch(definition, limit).await?;

        let mut written = 0u64;
        for record in records {
            messenger
                .write_record(record, configured.name(), configured.namespace())
                .await?;
            written += 1;
        }

        debug!(
            stream = configured.name(),
            records = written,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Stream synced"
        );
        Ok(written)
    }
}

#[async_trait]
impl Source for RandomApiSource {
    fn spec(&self) -> Result<ConnectorSpec> {
        Ok(
            ConnectorSpec::builder(self.bounds.connection_specification()?)
                .documentation_url(DOCUMENTATION_URL)
                .changelog_url(DOCUMENTATION_URL)
                .incremental(false)
                .normalization(true)
                .dbt(true)
                .destination_sync_modes(vec![DestinationSyncMode::Overwrite])
                .build(),
        )
    }

    async fn check(&self, config_path: &Path, messenger: &dyn Messenger) -> Result<()> {
        messenger
            .write_log(LogLevel::Info, "checking random api source")
            .await?;

        for name in self.registry.names() {
            let outcome = self.fetcher.probe(name).await;
            // Throttling: pause after every probe, successful or not
            tokio::time::sleep(self.probe_delay).await;
            if let Err(e) = outcome {
                warn!(stream = name, "Connectivity check failed: {}", e);
                return Err(e);
            }
        }

        let config = SourceConfig::load(config_path).await?;
        self.bounds.validate(config.limit)?;

        info!(
            streams = self.registry.len(),
            limit = config.limit,
            "Random API source check passed"
        );
        Ok(())
    }

    /// `config_path` is accepted for interface symmetry; the catalog does not
    /// depend on configuration.
    async fn discover(&self, _config_path: &Path, _messenger: &dyn Messenger) -> Result<Catalog> {
        Ok(self.registry.catalog())
    }

    /// `prev_state_path` is accepted for interface symmetry; this source only
    /// performs full refresh.
    async fn read(
        &self,
        config_path: &Path,
        prev_state_path: Option<&Path>,
        catalog: &ConfiguredCatalog,
        messenger: &dyn Messenger,
    ) -> Result<()> {
        messenger.write_log(LogLevel::Info, "running read").await?;

        let config = SourceConfig::load(config_path).await?;
        self.bounds.validate(config.limit)?;

        if let Some(path) = prev_state_path {
            debug!(path = %path.display(), "Ignoring previous state, full refresh only");
        }

        let plan = self.plan(catalog)?;
        let limit = config.limit;
        let total = AtomicU64::new(0);
        let started = Instant::now();

        info!(
            streams = plan.len(),
            limit,
            concurrency = self.read_concurrency,
            "Starting read"
        );

        stream::iter(plan.into_iter().map(Ok::<_, ConnectorError>))
            .try_for_each_concurrent(self.read_concurrency, |(definition, configured)| {
                let total = &total;
                async move {
                    let written = self
                        .sync_stream(definition, configured, limit, messenger)
                        .await
                        .inspect_err(|e| {
                            warn!(stream = configured.name(), "Stream failed: {}", e);
                        })?;
                    total.fetch_add(written, Ordering::Relaxed);
                    Ok(())
                }
            })
            .await?;

        info!(
            records = total.load(Ordering::Relaxed),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Read complete"
        );
        Ok(())
    }
}
