//! In-memory event source
//!
//! A [`Store`] of stream logs keyed by [`ObjectId`], backed by a `DashMap` so
//! different identities never contend. `get` hands out a fresh
//! [`MemoryStream`] handle; `put` registers a stream's log under its id.
//!
//! # First writes
//!
//! A stream built by this source (`create_stream`, `stream_factory`) claims
//! its identity when it first persists, so two writers racing to create the
//! same identity meet on one log and the second persist fails with a
//! conflict. `put` then only has to register streams that never persisted.
//! A foreign stream (built without this source) that arrives with history for
//! an identity that already has some is rejected the same way.

use crate::memory_stream::{MemoryStream, StreamRegistry};
use crate::sequence::SequenceCounter;
use dashmap::mapref::entry::Entry;
use eventide_core::{Error, EventStream, ObjectId, Result, Revision, Store};
use std::sync::Arc;
use tracing::{debug, warn};

/// Event source holding every stream in memory
#[derive(Debug, Default)]
pub struct MemoryEventSource {
    streams: StreamRegistry,
    sequence: Arc<SequenceCounter>,
}

impl MemoryEventSource {
    /// Create an empty event source
    pub fn new() -> Self {
        Self::default()
    }

    /// New empty stream sharing this source's commit sequence
    ///
    /// The stream is not registered until it is `put`.
    pub fn create_stream(&self, id: ObjectId) -> MemoryStream {
        MemoryStream::new(id, Arc::clone(&self.sequence)).with_registry(Arc::clone(&self.streams))
    }

    /// Stream factory bound to this source's commit sequence
    pub fn stream_factory(&self) -> impl Fn(ObjectId) -> MemoryStream + Send + Sync + 'static {
        let sequence = Arc::clone(&self.sequence);
        let streams = Arc::clone(&self.streams);
        move |id| MemoryStream::new(id, Arc::clone(&sequence)).with_registry(Arc::clone(&streams))
    }

    /// Number of registered streams
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// True if no stream is registered
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Durable version of the stream for `id`, if registered
    pub fn version_of(&self, id: ObjectId) -> Option<Revision> {
        let log = self.streams.get(&id).map(|entry| Arc::clone(entry.value()))?;
        let version = log.lock().version();
        Some(version)
    }

    /// Last commit sequence number handed out by any stream of this source
    pub fn last_sequence_number(&self) -> u64 {
        self.sequence.current()
    }
}

impl Store for MemoryEventSource {
    type Value = MemoryStream;

    fn has(&self, id: ObjectId) -> bool {
        !id.is_null() && self.streams.contains_key(&id)
    }

    fn get_at(&self, id: ObjectId, version: Revision) -> Result<MemoryStream> {
        if id.is_null() {
            return Err(Error::NullIdentity("id"));
        }
        // Clone the log out so the shard lock is released before the log is locked.
        let log = self
            .streams
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(Error::NotFound(id))?;
        Ok(MemoryStream::open(id, log, Arc::clone(&self.sequence), version)
            .with_registry(Arc::clone(&self.streams)))
    }

    fn put(&self, stream: &mut MemoryStream) -> Result<()> {
        let id = stream.id();
        if id.is_null() {
            return Err(Error::NullIdentity("stream.id()"));
        }

        match self.streams.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(Arc::clone(stream.log()));
                debug!(target: "eventide::stream", id = %id, "Registered new stream");
                Ok(())
            }
            Entry::Occupied(mut slot) => {
                if Arc::ptr_eq(slot.get(), stream.log()) {
                    return Ok(());
                }
                let actual = slot.get().lock().version();
                if actual > 0 {
                    warn!(
                        target: "eventide::stream",
                        id = %id,
                        actual,
                        "Rejected new stream for an identity that already has history"
                    );
                    return Err(Error::ConcurrencyConflict {
                        id,
                        expected: 0,
                        actual,
                    });
                }
                slot.insert(Arc::clone(stream.log()));
                Ok(())
            }
        }
    }
}
