//! Messenger trait: the write side of the connector protocol
//!
//! Implementations must be safe for concurrent writes. Read fans out one
//! pipeline per configured stream, and every pipeline writes through the same
//! messenger, so each `write_*` call has to land as one whole message.

use super::catalog::Catalog;
use super::message::{ConnectionStatus, LogLevel, Message};
use super::spec::ConnectorSpec;
use crate::error::Result;
use async_trait::async_trait;

/// Channel for logs, records and command responses
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Write a single protocol message
    async fn write_message(&self, message: Message) -> Result<()>;

    /// Write a log line
    async fn write_log(&self, level: LogLevel, message: &str) -> Result<()> {
        self.write_message(Message::log(level, message)).await
    }

    /// Write one record tagged with its stream and namespace
    async fn write_record(
        &self,
        record: serde_json::Value,
        stream: &str,
        namespace: Option<&str>,
    ) -> Result<()> {
        self.write_message(Message::record(stream, namespace, record))
            .await
    }

    /// Write the connector specification
    async fn write_spec(&self, spec: ConnectorSpec) -> Result<()> {
        self.write_message(Message::spec(spec)).await
    }

    /// Write the discovered catalog
    async fn write_catalog(&self, catalog: Catalog) -> Result<()> {
        self.write_message(Message::catalog(catalog)).await
    }

    /// Write the outcome of a connection check
    async fn write_connection_status(&self, status: ConnectionStatus) -> Result<()> {
        self.write_message(Message::connection_status(status)).await
    }
}
