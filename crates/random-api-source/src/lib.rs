//! random-api-source - Full-refresh source connector for the Random Data API
//!
//! Implements the Spec → Check → Discover → Read lifecycle against
//! <https://random-data-api.com/> and writes protocol messages (logs,
//! records, command responses) through a [`Messenger`].
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐   Command   ┌──────────────────┐   GET /{stream}?size=N   ┌──────────────┐
//! │ Orchestrator  │────────────▶│  SourceRunner    │─────────────────────────▶│ Random API   │
//! │ (spec/check/  │             │  RandomApiSource │◀─────────────────────────│              │
//! │  discover/    │◀────────────│  StreamRegistry  │      JSON array          └──────────────┘
//! │  read)        │  Messenger  │  RecordFetcher   │
//! └───────────────┘  (JSON      └──────────────────┘
//!                     lines)
//! ```
//!
//! # Library Usage
//!
//! ```rust,ignore
//! use random_api_source::prelude::*;
//!
//! let source = RandomApiSource::new(DEFAULT_BASE_URL)?;
//! let messenger = StdoutMessenger::stdout();
//!
//! source.check(Path::new("config.json"), &messenger).await?;
//! let catalog = source.discover(Path::new("config.json"), &messenger).await?;
//! let configured = ConfiguredCatalog::from_catalog(&catalog);
//! source.read(Path::new("config.json"), None, &configured, &messenger).await?;
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! source-random-api spec
//! source-random-api check --config config.json
//! source-random-api discover --config config.json
//! source-random-api read --config config.json --catalog catalog.json
//! ```

// Lifecycle traits and protocol types
pub mod traits;

// Error types
pub mod error;

pub mod config;
pub mod connectors;
pub mod registry;
pub mod source_runner;

pub use traits::testing;

pub use traits::{
    Catalog, CheckStatus, ConfiguredCatalog, ConfiguredStream, ConnectionStatus, ConnectorSpec,
    ConnectorSpecBuilder, DestinationSyncMode, LogLevel, LogMessage, Message, Messenger,
    RecordMessage, RecordingMessenger, Source, Stream, SyncMode,
};

pub use config::{LimitBounds, SourceConfig};
pub use connectors::{
    RandomApiSource, RecordFetcher, StdoutMessenger, WriterMessenger, DEFAULT_BASE_URL,
};
pub use error::{ConnectorError, ConnectorResult, LimitBound, Result};
pub use registry::{DecodeFn, StreamDefinition, StreamRegistry};
pub use source_runner::{Command, SourceRunner};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Catalog, Command, ConfiguredCatalog, ConfiguredStream, ConnectionStatus, ConnectorError,
        ConnectorResult, ConnectorSpec, LimitBounds, LogLevel, Message, Messenger,
        RandomApiSource, RecordFetcher, Result, Source, SourceConfig, SourceRunner,
        StdoutMessenger, Stream, StreamDefinition, StreamRegistry, DEFAULT_BASE_URL,
    };

    pub use async_trait::async_trait;
    pub use std::path::Path;
}
