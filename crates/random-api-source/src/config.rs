//! Source configuration
//!
//! The configuration file is a JSON object supplied by the orchestrator on
//! every `check` and `read`:
//!
//! ```json
//! { "limit": 10 }
//! ```
//!
//! It is loaded fresh for each invocation and never cached.

use crate::error::{ConnectorError, LimitBound, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Smallest `limit` the Random Data API accepts
pub const DEFAULT_MIN_LIMIT: i64 = 2;

/// Largest `limit` the Random Data API accepts
pub const DEFAULT_MAX_LIMIT: i64 = 100;

/// User-supplied source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SourceConfig {
    /// Max number of elements to pull per stream
    pub limit: i64,
}

impl SourceConfig {
    /// Load the configuration from a JSON file
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read(path)
            .await
            .map_err(|e| ConnectorError::config_load(path, e))?;
        let config = Self::from_slice(&raw).map_err(|e| match e {
            ConnectorError::Json(e) => ConnectorError::config_load(path, e),
            other => other,
        })?;
        debug!(path = %path.display(), limit = config.limit, "Loaded source configuration");
        Ok(config)
    }

    /// Parse the configuration from raw JSON bytes
    pub fn from_slice(raw: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(raw)?)
    }
}

/// Inclusive bounds for the `limit` setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitBounds {
    pub min: i64,
    pub max: i64,
}

impl Default for LimitBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_LIMIT,
            max: DEFAULT_MAX_LIMIT,
        }
    }
}

impl LimitBounds {
    /// Create bounds; `min` must not exceed `max`
    pub fn new(min: i64, max: i64) -> Self {
        debug_assert!(min <= max, "limit bounds inverted: {} > {}", min, max);
        Self { min, max }
    }

    /// Validate a limit, naming the violated bound on failure
    pub fn validate(&self, value: i64) -> Result<()> {
        if value < self.min {
            return Err(ConnectorError::ConfigRange {
                bound: LimitBound::Min,
                limit: self.min,
                value,
            });
        }
        if value > self.max {
            return Err(ConnectorError::ConfigRange {
                bound: LimitBound::Max,
                limit: self.max,
                value,
            });
        }
        Ok(())
    }

    /// Human-readable description for the configuration form
    pub fn describe(&self) -> String {
        format!(
            "max number of element to pull per instance. Allowed values between {} and {}",
            self.min, self.max
        )
    }

    /// JSON Schema of [`SourceConfig`] with these bounds embedded in the
    /// `limit` description
    pub fn connection_specification(&self) -> Result<serde_json::Value> {
        let mut schema = serde_json::to_value(schemars::schema_for!(SourceConfig))?;
        if let Some(obj) = schema.as_object_mut() {
            obj.insert("title".into(), "Random Data API".into());
            obj.insert("description".into(), "Random Data Source API".into());
        }
        if let Some(limit) = schema.pointer_mut("/properties/limit") {
            if let Some(limit) = limit.as_object_mut() {
                limit.insert("description".into(), self.describe().into());
            }
        }
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_bounds() {
        let bounds = LimitBounds::default();
        assert_eq!(bounds.min, 2);
        assert_eq!(bounds.max, 100);
    }

    #[test]
    fn test_validate_inside_bounds() {
        let bounds = LimitBounds::default();
        for value in [2, 3, 50, 99, 100] {
            assert!(bounds.validate(value).is_ok(), "{} should be accepted", value);
        }
    }

    #[test]
    fn test_validate_below_min() {
        let bounds = LimitBounds::default();
        for value in [i64::MIN, -1, 0, 1] {
            match bounds.validate(value) {
                Err(ConnectorError::ConfigRange {
                    bound: LimitBound::Min,
                    limit: 2,
                    value: v,
                }) => assert_eq!(v, value),
                other => panic!("unexpected result for {}: {:?}", value, other),
            }
        }
    }

    #[test]
    fn test_validate_above_max() {
        let bounds = LimitBounds::default();
        for value in [101, 1000, i64::MAX] {
            match bounds.validate(value) {
                Err(ConnectorError::ConfigRange {
                    bound: LimitBound::Max,
                    limit: 100,
                    value: v,
                }) => assert_eq!(v, value),
                other => panic!("unexpected result for {}: {:?}", value, other),
            }
        }
    }

    #[test]
    fn test_custom_bounds() {
        let bounds = LimitBounds::new(5, 10);
        assert!(bounds.validate(4).is_err());
        assert!(bounds.validate(5).is_ok());
        assert!(bounds.validate(10).is_ok());
        assert!(bounds.validate(11).is_err());
    }

    #[test]
    fn test_connection_specification_embeds_bounds() {
        let schema = LimitBounds::new(3, 7).connection_specification().unwrap();

        assert_eq!(schema["title"], "Random Data API");
        assert_eq!(schema["required"], serde_json::json!(["limit"]));
        assert_eq!(schema["properties"]["limit"]["type"], "integer");
        let description = schema["properties"]["limit"]["description"]
            .as_str()
            .unwrap();
        assert!(description.contains("between 3 and 7"));
    }

    #[test]
    fn test_from_slice() {
        let config = SourceConfig::from_slice(br#"{"limit": 10}"#).unwrap();
        assert_eq!(config.limit, 10);

        assert!(SourceConfig::from_slice(br#"{"limit": "ten"}"#).is_err());
        assert!(SourceConfig::from_slice(br#"{}"#).is_err());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"limit": 42}}"#).unwrap();

        let config = SourceConfig::load(file.path()).await.unwrap();
        assert_eq!(config, SourceConfig { limit: 42 });
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = SourceConfig::load(&path).await.unwrap_err();
        assert!(matches!(err, ConnectorError::ConfigLoad { .. }));
    }

    #[tokio::test]
    async fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = SourceConfig::load(file.path()).await.unwrap_err();
        match err {
            ConnectorError::ConfigLoad { path, .. } => assert_eq!(path, file.path()),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
