//! Built-in connectors
//!
//! - `random_api` - Random Data API source (beers, appliances)
//! - `stdout` - JSON-lines messenger for the protocol channel

pub mod random_api;
pub mod stdout;

pub use random_api::{RandomApiSource, RecordFetcher, DEFAULT_BASE_URL};
pub use stdout::{StdoutMessenger, WriterMessenger};
