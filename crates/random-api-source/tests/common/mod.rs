//! Shared fixtures for integration tests
//!
//! `StubApi` is an in-process HTTP server standing in for the Random Data
//! API. Each path answers with a canned status and body, and every request
//! URI (path plus query) is recorded in arrival order.
//!
//! ```rust,ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use parking_lot::Mutex;
use random_api_source::{
    ConfiguredCatalog, ConfiguredStream, RandomApiSource, Stream, StreamDefinition,
    StreamRegistry,
};
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;

#[derive(Default)]
struct StubState {
    routes: HashMap<String, (StatusCode, String)>,
    requests: Mutex<Vec<String>>,
}

/// Running stub of the remote API
pub struct StubApi {
    pub base_url: String,
    state: Arc<StubState>,
}

impl StubApi {
    /// Recorded request URIs, e.g. `/widgets?size=2`
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().clone()
    }
}

/// Builder for [`StubApi`]
#[derive(Default)]
pub struct StubApiBuilder {
    routes: HashMap<String, (StatusCode, String)>,
}

impl StubApiBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `GET /{stream}` (any query) with 200 and `body`
    pub fn ok(self, stream: &str, body: serde_json::Value) -> Self {
        self.route(stream, StatusCode::OK, body.to_string())
    }

    /// Answer `GET /{stream}` with an arbitrary status and raw body
    pub fn route(mut self, stream: &str, status: StatusCode, body: impl Into<String>) -> Self {
        self.routes
            .insert(format!("/{}", stream), (status, body.into()));
        self
    }

    /// Bind to an ephemeral port and serve in the background
    pub async fn spawn(self) -> StubApi {
        let state = Arc::new(StubState {
            routes: self.routes,
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        StubApi {
            base_url: format!("http://{}", addr),
            state,
        }
    }
}

async fn handle(State(state): State<Arc<StubState>>, uri: Uri) -> impl IntoResponse {
    state.requests.lock().push(uri.to_string());
    match state.routes.get(uri.path()) {
        Some((status, body)) => (
            *status,
            [(header::CONTENT_TYPE, "application/json")],
            body.clone(),
        ),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"error":"not found"}"#.to_string(),
        ),
    }
}

/// Registry of untyped streams with the given names
pub fn untyped_registry(names: &[&str]) -> StreamRegistry {
    names.iter().fold(StreamRegistry::new(), |registry, name| {
        registry.with(StreamDefinition::untyped(*name)).unwrap()
    })
}

/// Source against the stub with no probe delay
pub fn source_for(api: &StubApi, registry: StreamRegistry) -> RandomApiSource {
    RandomApiSource::with_registry(&api.base_url, registry)
        .unwrap()
        .probe_delay(Duration::ZERO)
}

/// Configured catalog selecting `(name, namespace)` pairs in order
pub fn configured(streams: &[(&str, Option<&str>)]) -> ConfiguredCatalog {
    streams
        .iter()
        .fold(ConfiguredCatalog::new(), |catalog, (name, namespace)| {
            let mut stream = Stream::new(*name, serde_json::json!({}));
            if let Some(ns) = namespace {
                stream = stream.namespace(*ns);
            }
            catalog.add_stream(ConfiguredStream::from_stream(&stream))
        })
}

/// Temporary JSON file with the given contents
pub fn json_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}
