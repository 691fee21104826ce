//! Error types for random-api-source
//!
//! Every lifecycle operation returns [`ConnectorError`]. Errors are terminal for
//! the invocation that produced them; the runner surfaces them and the process
//! exits with a failure status.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for connector operations
pub type ConnectorResult<T> = std::result::Result<T, ConnectorError>;

/// Result type alias used by the lifecycle traits
pub type Result<T> = ConnectorResult<T>;

/// Which side of the allowed `limit` range was violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitBound {
    /// Lower bound (inclusive)
    Min,
    /// Upper bound (inclusive)
    Max,
}

impl fmt::Display for LimitBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Min => write!(f, "greater than or equal to"),
            Self::Max => write!(f, "less than or equal to"),
        }
    }
}

/// Errors that can occur in connector operations
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Remote API unreachable or a probe did not answer 200
    #[error("connectivity error: {0}")]
    Connectivity(String),

    /// Configuration file missing or unparseable
    #[error("failed to load configuration from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    /// `limit` outside the allowed range
    #[error("limit configuration value {value} must be {bound} {limit}")]
    ConfigRange {
        bound: LimitBound,
        limit: i64,
        value: i64,
    },

    /// Configured stream is not present in the stream registry
    #[error("stream not supported: {0}")]
    UnsupportedStream(String),

    /// A stream with the same name is already registered
    #[error("stream already registered: {0}")]
    DuplicateStream(String),

    /// Transport failure while fetching records
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Fetch answered with a status other than 200
    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    /// Response body did not match the stream's record shape
    #[error("failed to decode records for stream '{stream}': {source}")]
    Decode {
        stream: String,
        #[source]
        source: serde_json::Error,
    },

    /// Downstream channel rejected a write
    #[error("messenger write failed: {0}")]
    MessengerWrite(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConnectorError {
    /// Create a connectivity error
    pub fn connectivity(msg: impl Into<String>) -> Self {
        Self::Connectivity(msg.into())
    }

    /// Create a configuration load error
    pub fn config_load(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::ConfigLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an unsupported stream error
    pub fn unsupported_stream(name: impl Into<String>) -> Self {
        Self::UnsupportedStream(name.into())
    }

    /// Create a messenger write error
    pub fn messenger(msg: impl Into<String>) -> Self {
        Self::MessengerWrite(msg.into())
    }
}
