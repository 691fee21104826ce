//! Protocol messages written to the downstream consumer
//!
//! One JSON object per message, tagged by `type`:
//!
//! ```text
//! {"type":"LOG","log":{"level":"INFO","message":"running read"}}
//! {"type":"RECORD","record":{"stream":"beers","data":{...},"emitted_at":1700000000000}}
//! ```

use super::catalog::Catalog;
use super::spec::ConnectorSpec;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A message emitted by the connector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Log line for the consumer
    Log { log: LogMessage },
    /// One extracted record
    Record { record: RecordMessage },
    /// Answer to the spec command
    Spec { spec: ConnectorSpec },
    /// Answer to the discover command
    Catalog { catalog: Catalog },
    /// Answer to the check command
    ConnectionStatus {
        #[serde(rename = "connectionStatus")]
        connection_status: ConnectionStatus,
    },
}

impl Message {
    /// Create a log message
    pub fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Self::Log {
            log: LogMessage {
                level,
                message: message.into(),
            },
        }
    }

    /// Create a record message stamped with the current time
    pub fn record(
        stream: impl Into<String>,
        namespace: Option<&str>,
        data: serde_json::Value,
    ) -> Self {
        Self::Record {
            record: RecordMessage {
                stream: stream.into(),
                namespace: namespace.map(str::to_string),
                data,
                emitted_at: Utc::now().timestamp_millis(),
            },
        }
    }

    /// Create a spec message
    pub fn spec(spec: ConnectorSpec) -> Self {
        Self::Spec { spec }
    }

    /// Create a catalog message
    pub fn catalog(catalog: Catalog) -> Self {
        Self::Catalog { catalog }
    }

    /// Create a connection status message
    pub fn connection_status(status: ConnectionStatus) -> Self {
        Self::ConnectionStatus {
            connection_status: status,
        }
    }

    /// Get the message type as written on the wire
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Log { .. } => "LOG",
            Self::Record { .. } => "RECORD",
            Self::Spec { .. } => "SPEC",
            Self::Catalog { .. } => "CATALOG",
            Self::ConnectionStatus { .. } => "CONNECTION_STATUS",
        }
    }

    /// Borrow the record payload if this is a record message
    pub fn as_record(&self) -> Option<&RecordMessage> {
        match self {
            Self::Record { record } => Some(record),
            _ => None,
        }
    }
}

/// Log payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogMessage {
    pub level: LogLevel,
    pub message: String,
}

/// Record payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMessage {
    /// Stream the record was extracted from
    pub stream: String,

    /// Namespace of the stream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Record data
    pub data: serde_json::Value,

    /// Emission time, milliseconds since the epoch
    pub emitted_at: i64,
}

/// Outcome of a connection check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub status: CheckStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ConnectionStatus {
    /// Successful check
    pub fn succeeded() -> Self {
        Self {
            status: CheckStatus::Succeeded,
            message: None,
        }
    }

    /// Failed check with the reason
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Failed,
            message: Some(message.into()),
        }
    }

    /// Check if successful
    pub fn is_success(&self) -> bool {
        self.status == CheckStatus::Succeeded
    }
}

/// Connection check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    Succeeded,
    Failed,
}

/// Log level for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Trace level
    Trace,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warning level
    Warn,
    /// Error level
    Error,
    /// Fatal level
    Fatal,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
            Self::Fatal => write!(f, "fatal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_log_message_wire_format() {
        let msg = Message::log(LogLevel::Info, "running read");
        let value = serde_json::to_value(&msg).unwrap();

        assert_eq!(
            value,
            json!({"type": "LOG", "log": {"level": "INFO", "message": "running read"}})
        );
    }

    #[test]
    fn test_record_message() {
        let msg = Message::record("widgets", Some("shop"), json!({"id": 1}));
        assert_eq!(msg.type_name(), "RECORD");

        let record = msg.as_record().unwrap();
        assert_eq!(record.stream, "widgets");
        assert_eq!(record.namespace.as_deref(), Some("shop"));
        assert_eq!(record.data, json!({"id": 1}));
        assert!(record.emitted_at > 0);

        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "RECORD");
        assert_eq!(value["record"]["stream"], "widgets");
    }

    #[test]
    fn test_record_without_namespace_omits_field() {
        let msg = Message::record("beers", None, json!({}));
        let value = serde_json::to_value(&msg).unwrap();
        assert!(value["record"].get("namespace").is_none());
    }

    #[test]
    fn test_connection_status() {
        let ok = ConnectionStatus::succeeded();
        assert!(ok.is_success());

        let failed = ConnectionStatus::failed("status 503");
        assert!(!failed.is_success());

        let value = serde_json::to_value(Message::connection_status(failed)).unwrap();
        assert_eq!(value["type"], "CONNECTION_STATUS");
        assert_eq!(value["connectionStatus"]["status"], "FAILED");
        assert_eq!(value["connectionStatus"]["message"], "status 503");
    }
}
