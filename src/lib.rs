//! eventide - event-sourced aggregate persistence
//!
//! Domain objects are rebuilt from an ordered history of immutable events and
//! persisted by appending the events their mutations produced.
//!
//! # Quick Start
//!
//! ```ignore
//! use eventide::{Aggregate, ArtifactStore, EventDispatcher, MemoryEventSource, ObjectId, Store};
//! use std::sync::Arc;
//!
//! struct Deposited { amount: i64 }
//! #[derive(Default)]
//! struct Balance { amount: i64 }
//!
//! let dispatcher = Arc::new(EventDispatcher::new());
//! dispatcher.subscribe(|b: &mut Balance, e: &Deposited| b.amount += e.amount);
//!
//! let source = Arc::new(MemoryEventSource::new());
//! let streams = source.stream_factory();
//! let handlers = Arc::clone(&dispatcher);
//! let store = ArtifactStore::new(source, streams, move |id: ObjectId, _: u64| {
//!     Aggregate::new(id, Arc::clone(&handlers), Balance::default())
//! });
//!
//! let mut account = Aggregate::new(ObjectId::new(), dispatcher, Balance::default());
//! account.apply_change(Deposited { amount: 10 });
//! store.put(&mut account)?;
//!
//! let loaded = store.get(account.id())?;
//! assert_eq!(loaded.state().amount, 10);
//! ```
//!
//! # Architecture
//!
//! - `eventide-core`: identities, the event envelope, commits and the
//!   `Store`/`EventStream` contracts
//! - `eventide-artifact`: the dispatcher, artifacts and aggregates
//! - `eventide-storage`: in-memory streams and event sources
//! - `eventide-engine`: the artifact store and its configuration

pub use eventide_artifact::{Aggregate, AggregateRoot, Artifact, EventDispatcher, Handler};
pub use eventide_core::{
    Commit, Error, Event, EventSequence, EventStream, EventType, ObjectFactory, ObjectId, Result,
    Revision, Store, StreamFactory, Timestamp, MAX_REVISION,
};
pub use eventide_engine::{ArtifactStore, StoreConfig, CONFIG_FILE_NAME};
pub use eventide_storage::{
    MemoryEventSource, MemoryStream, NullStore, SequenceCounter, SharedLog, StreamLog,
    StreamRegistry,
};
