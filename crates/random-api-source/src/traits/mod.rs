//! Core connector traits and types
//!
//! - `Source` - the Spec/Check/Discover/Read lifecycle
//! - `Messenger` - write side of the protocol (logs, records, responses)
//! - `catalog` - stream descriptors and the consumer's selection
//! - `spec` - connector specification
//! - `message` - protocol message envelopes
//! - `testing` - recording messenger for tests

pub mod catalog;
pub mod message;
pub mod messenger;
pub mod source;
pub mod spec;
pub mod testing;

pub use catalog::{
    Catalog, ConfiguredCatalog, ConfiguredStream, DestinationSyncMode, Stream, SyncMode,
};
pub use message::{
    CheckStatus, ConnectionStatus, LogLevel, LogMessage, Message, RecordMessage,
};
pub use messenger::Messenger;
pub use source::Source;
pub use spec::{ConnectorSpec, ConnectorSpecBuilder};
pub use testing::RecordingMessenger;
