//! Testing utilities for connectors
//!
//! A messenger that records everything written to it, for asserting on the
//! output of a lifecycle call without a real transport.
//!
//! # Example
//!
//! ```rust,ignore
//! use random_api_source::testing::RecordingMessenger;
//!
//! #[tokio::test]
//! async fn test_my_source() {
//!     let messenger = RecordingMessenger::new();
//!     source.read(&config, None, &catalog, &messenger).await.unwrap();
//!
//!     assert_eq!(messenger.records().len(), 2);
//! }
//! ```

use super::message::{LogMessage, Message, RecordMessage};
use super::messenger::Messenger;
use crate::error::{ConnectorError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// A messenger that captures every message in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingMessenger {
    messages: Arc<Mutex<Vec<Message>>>,
    fail_after: Arc<Mutex<Option<usize>>>,
}

impl RecordingMessenger {
    /// Create a new recording messenger
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every write once `writes` messages have been accepted
    pub fn fail_after(self, writes: usize) -> Self {
        *self.fail_after.lock() = Some(writes);
        self
    }

    /// All accepted messages, in write order
    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().clone()
    }

    /// Accepted record messages, in write order
    pub fn records(&self) -> Vec<RecordMessage> {
        self.messages
            .lock()
            .iter()
            .filter_map(|m| m.as_record().cloned())
            .collect()
    }

    /// Accepted records of one stream, in write order
    pub fn records_for(&self, stream: &str) -> Vec<RecordMessage> {
        self.records()
            .into_iter()
            .filter(|r| r.stream == stream)
            .collect()
    }

    /// Accepted log messages, in write order
    pub fn logs(&self) -> Vec<LogMessage> {
        self.messages
            .lock()
            .iter()
            .filter_map(|m| match m {
                Message::Log { log } => Some(log.clone()),
                _ => None,
            })
            .collect()
    }

    /// Clear captured messages
    pub fn clear(&self) {
        self.messages.lock().clear();
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn write_message(&self, message: Message) -> Result<()> {
        let limit = *self.fail_after.lock();
        let mut messages = self.messages.lock();
        if let Some(limit) = limit {
            if messages.len() >= limit {
                return Err(ConnectorError::messenger(format!(
                    "recording messenger closed after {} messages",
                    limit
                )));
            }
        }
        messages.push(message);
        Ok(())
    }
}
