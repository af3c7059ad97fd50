//! Storage layer for eventide
//!
//! This crate implements the in-memory persistence substrate:
//! - MemoryStream: handle onto one identity's log, with atomic persist and
//!   stale-handle detection
//! - MemoryEventSource: DashMap of stream logs, a `Store` of MemoryStream
//! - SequenceCounter: global commit sequence shared by a source's streams
//! - NullStore: a store that holds nothing

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod event_source;
pub mod memory_stream;
pub mod null_store;
pub mod sequence;

pub use event_source::MemoryEventSource;
pub use memory_stream::{MemoryStream, SharedLog, StreamLog, StreamRegistry};
pub use null_store::NullStore;
pub use sequence::SequenceCounter;
