//! Source connector trait
//!
//! The lifecycle surface an orchestrator drives: `spec`, `check`, `discover`
//! and `read`. Every call is independent; nothing is carried between
//! invocations.

use super::catalog::{Catalog, ConfiguredCatalog};
use super::messenger::Messenger;
use super::spec::ConnectorSpec;
use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Trait for source connectors
///
/// # Example
///
/// ```rust,ignore
/// use random_api_source::prelude::*;
///
/// pub struct MySource;
///
/// #[async_trait]
/// impl Source for MySource {
///     fn spec(&self) -> Result<ConnectorSpec> {
///         Ok(ConnectorSpec::new(serde_json::json!({"type": "object"})))
///     }
///
///     async fn check(&self, config_path: &Path, messenger: &dyn Messenger) -> Result<()> {
///         Ok(())
///     }
///
///     async fn discover(&self, config_path: &Path, messenger: &dyn Messenger) -> Result<Catalog> {
///         Ok(Catalog::default())
///     }
///
///     async fn read(
///         &self,
///         config_path: &Path,
///         prev_state_path: Option<&Path>,
///         catalog: &ConfiguredCatalog,
///         messenger: &dyn Messenger,
///     ) -> Result<()> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Source: Send + Sync {
    /// Return the connector specification
    ///
    /// Static description of the configuration form. Performs no I/O.
    fn spec(&self) -> Result<ConnectorSpec>;

    /// Check connectivity and configuration
    ///
    /// Returns `Ok(())` only when the remote system is reachable and the
    /// configuration at `config_path` is valid. The first failure wins.
    async fn check(&self, config_path: &Path, messenger: &dyn Messenger) -> Result<()>;

    /// Discover available streams
    async fn discover(&self, config_path: &Path, messenger: &dyn Messenger) -> Result<Catalog>;

    /// Read data from the source
    ///
    /// Extracts every stream in `catalog` and forwards its records through
    /// `messenger`. Any stream failure fails the whole read.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Source configuration file
    /// * `prev_state_path` - Previous state for incremental sync (unused by full-refresh sources)
    /// * `catalog` - Consumer's configured streams
    /// * `messenger` - Output channel
    async fn read(
        &self,
        config_path: &Path,
        prev_state_path: Option<&Path>,
        catalog: &ConfiguredCatalog,
        messenger: &dyn Messenger,
    ) -> Result<()>;
}
