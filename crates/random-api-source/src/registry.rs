//! Stream registry
//!
//! The registry is the single source of truth for what a source can extract.
//! Each [`StreamDefinition`] pairs a stream name with its declared JSON schema
//! and the function that decodes a response body into records, so discovery
//! and read dispatch can never drift apart.

use crate::error::{ConnectorError, Result};
use crate::traits::catalog::{Catalog, Stream};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Decodes a JSON array response body into record values
pub type DecodeFn = fn(&[u8]) -> serde_json::Result<Vec<serde_json::Value>>;

/// A named, independently extractable entity type
#[derive(Clone)]
pub struct StreamDefinition {
    name: String,
    json_schema: serde_json::Value,
    decode: DecodeFn,
}

impl StreamDefinition {
    /// Create a definition from explicit parts
    pub fn new(name: impl Into<String>, json_schema: serde_json::Value, decode: DecodeFn) -> Self {
        Self {
            name: name.into(),
            json_schema,
            decode,
        }
    }

    /// Define a stream whose records decode into `T`
    ///
    /// The schema is derived from `T`, and every response element must
    /// deserialize into `T` or the whole batch is rejected.
    pub fn typed<T>(name: impl Into<String>) -> Result<Self>
    where
        T: DeserializeOwned + Serialize + JsonSchema,
    {
        let schema = serde_json::to_value(schemars::schema_for!(T))?;
        Ok(Self::new(name, schema, decode_as::<T>))
    }

    /// Define a stream that accepts any JSON objects
    pub fn untyped(name: impl Into<String>) -> Self {
        Self::new(
            name,
            serde_json::json!({"type": "object"}),
            decode_objects,
        )
    }

    /// Stream name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared record schema
    pub fn json_schema(&self) -> &serde_json::Value {
        &self.json_schema
    }

    /// Decode a response body into records
    pub fn decode(&self, body: &[u8]) -> Result<Vec<serde_json::Value>> {
        (self.decode)(body).map_err(|source| ConnectorError::Decode {
            stream: self.name.clone(),
            source,
        })
    }

    /// Catalog descriptor for this stream
    pub fn descriptor(&self) -> Stream {
        Stream::new(self.name.clone(), self.json_schema.clone())
    }
}

impl fmt::Debug for StreamDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamDefinition")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn decode_as<T>(body: &[u8]) -> serde_json::Result<Vec<serde_json::Value>>
where
    T: DeserializeOwned + Serialize,
{
    let records: Vec<T> = serde_json::from_slice(body)?;
    records.iter().map(serde_json::to_value).collect()
}

fn decode_objects(body: &[u8]) -> serde_json::Result<Vec<serde_json::Value>> {
    let records: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_slice(body)?;
    Ok(records.into_iter().map(serde_json::Value::Object).collect())
}

/// Ordered set of stream definitions with unique names
#[derive(Debug, Clone, Default)]
pub struct StreamRegistry {
    streams: Vec<StreamDefinition>,
}

impl StreamRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stream; names must be unique
    pub fn register(&mut self, definition: StreamDefinition) -> Result<()> {
        if self.get(definition.name()).is_some() {
            return Err(ConnectorError::DuplicateStream(definition.name));
        }
        self.streams.push(definition);
        Ok(())
    }

    /// Builder-style registration
    pub fn with(mut self, definition: StreamDefinition) -> Result<Self> {
        self.register(definition)?;
        Ok(self)
    }

    /// Look up a stream by name
    pub fn get(&self, name: &str) -> Option<&StreamDefinition> {
        self.streams.iter().find(|s| s.name == name)
    }

    /// Stream names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.streams.iter().map(|s| s.name())
    }

    /// Iterate over definitions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &StreamDefinition> {
        self.streams.iter()
    }

    /// Number of registered streams
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Check if no streams are registered
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Build the catalog of every registered stream
    pub fn catalog(&self) -> Catalog {
        self.streams
            .iter()
            .fold(Catalog::new(), |catalog, s| catalog.add_stream(s.descriptor()))
    }
}
