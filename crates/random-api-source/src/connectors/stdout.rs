//! Stdout messenger
//!
//! Writes protocol messages as compact JSON, one per line. The writer sits
//! behind a mutex so concurrent stream pipelines never interleave partial
//! lines.

use crate::error::{ConnectorError, Result};
use crate::traits::message::Message;
use crate::traits::messenger::Messenger;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::io::Write;

/// Messenger writing JSON lines to any writer
#[derive(Debug)]
pub struct WriterMessenger<W> {
    writer: Mutex<W>,
}

/// Messenger writing to the process's stdout
pub type StdoutMessenger = WriterMessenger<std::io::Stdout>;

impl StdoutMessenger {
    /// Create a messenger on stdout
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl Default for StdoutMessenger {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write + Send> WriterMessenger<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Unwrap the inner writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_line(&self, message: &Message) -> Result<()> {
        let line = serde_json::to_vec(message)?;
        let mut writer = self.writer.lock();
        write_json_line(&mut *writer, &line).map_err(|e| {
            ConnectorError::messenger(format!(
                "failed to write {} message: {}",
                message.type_name(),
                e
            ))
        })
    }
}

fn write_json_line<W: Write>(writer: &mut W, line: &[u8]) -> std::io::Result<()> {
    writer.write_all(line)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

#[async_trait]
impl<W: Write + Send> Messenger for WriterMessenger<W> {
    async fn write_message(&self, message: Message) -> Result<()> {
        self.write_line(&message)
    }
}
