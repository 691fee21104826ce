//! Catalog types for describing available streams

use serde::{Deserialize, Serialize};

/// Catalog of available streams from a source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Available streams
    pub streams: Vec<Stream>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stream to the catalog
    pub fn add_stream(mut self, stream: Stream) -> Self {
        self.streams.push(stream);
        self
    }

    /// Find a stream by name
    pub fn find_stream(&self, name: &str) -> Option<&Stream> {
        self.streams.iter().find(|s| s.name == name)
    }
}

/// A stream descriptor: one independently extractable entity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    /// Unique name of the stream (e.g., "beers")
    pub name: String,

    /// Namespace the records are tagged with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// JSON Schema of the stream's records
    pub json_schema: serde_json::Value,

    /// Supported sync modes for this stream
    #[serde(default = "default_sync_modes")]
    pub supported_sync_modes: Vec<SyncMode>,
}

fn default_sync_modes() -> Vec<SyncMode> {
    vec![SyncMode::FullRefresh]
}

impl Stream {
    /// Create a new stream
    pub fn new(name: impl Into<String>, json_schema: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            json_schema,
            supported_sync_modes: default_sync_modes(),
        }
    }

    /// Set namespace
    pub fn namespace(mut self, ns: impl Into<String>) -> Self {
        self.namespace = Some(ns.into());
        self
    }
}

/// Sync mode for a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Full refresh: re-read all data each sync
    #[default]
    FullRefresh,
    /// Incremental: read only new/changed data
    Incremental,
}

/// Configured catalog (the consumer's selection of streams for one read)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfiguredCatalog {
    /// Configured streams, in the order they should be extracted
    pub streams: Vec<ConfiguredStream>,
}

impl ConfiguredCatalog {
    /// Create an empty configured catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a catalog, selecting all streams with default settings
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            streams: catalog
                .streams
                .iter()
                .map(ConfiguredStream::from_stream)
                .collect(),
        }
    }

    /// Add a configured stream
    pub fn add_stream(mut self, stream: ConfiguredStream) -> Self {
        self.streams.push(stream);
        self
    }
}

/// A stream selected by the consumer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfiguredStream {
    /// The stream definition
    pub stream: Stream,

    /// Selected sync mode
    #[serde(default)]
    pub sync_mode: SyncMode,

    /// Destination sync mode
    #[serde(default)]
    pub destination_sync_mode: DestinationSyncMode,
}

impl ConfiguredStream {
    /// Create from a stream with default settings
    pub fn from_stream(stream: &Stream) -> Self {
        Self {
            stream: stream.clone(),
            sync_mode: SyncMode::FullRefresh,
            destination_sync_mode: DestinationSyncMode::Overwrite,
        }
    }

    /// Stream name used for dispatch
    pub fn name(&self) -> &str {
        &self.stream.name
    }

    /// Namespace the stream's records are tagged with
    pub fn namespace(&self) -> Option<&str> {
        self.stream.namespace.as_deref()
    }
}

/// Destination sync mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationSyncMode {
    /// Append new records
    Append,
    /// Overwrite existing data
    #[default]
    Overwrite,
    /// Append with deduplication
    AppendDedup,
}
