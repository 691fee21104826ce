//! Connector specification types

use super::catalog::DestinationSyncMode;
use serde::{Deserialize, Serialize};

/// Connector specification describing its capabilities and configuration form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorSpec {
    /// Documentation URL
    #[serde(rename = "documentationUrl", skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,

    /// Changelog URL
    #[serde(rename = "changelogUrl", skip_serializing_if = "Option::is_none")]
    pub changelog_url: Option<String>,

    /// JSON Schema for the connector's configuration
    #[serde(rename = "connectionSpecification")]
    pub connection_specification: serde_json::Value,

    /// Whether this connector supports incremental sync with state
    #[serde(rename = "supportsIncremental")]
    pub supports_incremental: bool,

    /// Whether destinations may normalize the emitted records
    #[serde(rename = "supportsNormalization")]
    pub supports_normalization: bool,

    /// Whether destinations may run dbt on the emitted records
    #[serde(rename = "supportsDBT")]
    pub supports_dbt: bool,

    /// Destination sync modes this source can feed
    pub supported_destination_sync_modes: Vec<DestinationSyncMode>,
}

impl ConnectorSpec {
    /// Create a spec around a connection specification
    pub fn new(connection_specification: serde_json::Value) -> Self {
        Self {
            documentation_url: None,
            changelog_url: None,
            connection_specification,
            supports_incremental: false,
            supports_normalization: false,
            supports_dbt: false,
            supported_destination_sync_modes: vec![DestinationSyncMode::Append],
        }
    }

    /// Create a builder for fluent construction
    pub fn builder(connection_specification: serde_json::Value) -> ConnectorSpecBuilder {
        ConnectorSpecBuilder::new(connection_specification)
    }
}

/// Builder for ConnectorSpec
#[derive(Debug)]
pub struct ConnectorSpecBuilder {
    spec: ConnectorSpec,
}

impl ConnectorSpecBuilder {
    /// Create a new builder
    pub fn new(connection_specification: serde_json::Value) -> Self {
        Self {
            spec: ConnectorSpec::new(connection_specification),
        }
    }

    /// Set documentation URL
    pub fn documentation_url(mut self, url: impl Into<String>) -> Self {
        self.spec.documentation_url = Some(url.into());
        self
    }

    /// Set changelog URL
    pub fn changelog_url(mut self, url: impl Into<String>) -> Self {
        self.spec.changelog_url = Some(url.into());
        self
    }

    /// Enable incremental sync support
    pub fn incremental(mut self, supported: bool) -> Self {
        self.spec.supports_incremental = supported;
        self
    }

    /// Enable normalization support
    pub fn normalization(mut self, supported: bool) -> Self {
        self.spec.supports_normalization = supported;
        self
    }

    /// Enable dbt support
    pub fn dbt(mut self, supported: bool) -> Self {
        self.spec.supports_dbt = supported;
        self
    }

    /// Set supported destination sync modes
    pub fn destination_sync_modes(mut self, modes: Vec<DestinationSyncMode>) -> Self {
        self.spec.supported_destination_sync_modes = modes;
        self
    }

    /// Build the spec
    pub fn build(self) -> ConnectorSpec {
        self.spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_connector_spec_builder() {
        let spec = ConnectorSpec::builder(json!({"type": "object"}))
            .documentation_url("https://example.com/docs")
            .normalization(true)
            .dbt(true)
            .destination_sync_modes(vec![DestinationSyncMode::Overwrite])
            .build();

        assert_eq!(
            spec.documentation_url,
            Some("https://example.com/docs".to_string())
        );
        assert!(!spec.supports_incremental);
        assert!(spec.supports_normalization);
        assert!(spec.supports_dbt);
        assert_eq!(
            spec.supported_destination_sync_modes,
            vec![DestinationSyncMode::Overwrite]
        );
    }

    #[test]
    fn test_connector_spec_wire_names() {
        let spec = ConnectorSpec::builder(json!({"type": "object"}))
            .dbt(true)
            .build();
        let value = serde_json::to_value(&spec).unwrap();

        assert_eq!(value["connectionSpecification"]["type"], "object");
        assert_eq!(value["supportsDBT"], true);
        assert_eq!(value["supportsIncremental"], false);
        assert!(value.get("documentationUrl").is_none());
    }
}
