//! Commit records
//!
//! A [`Commit`] describes one successful persist on a stream. `version` is the
//! stream version *before* the write and `sequence_number` is a global
//! ordering hint across streams; together they are the optimistic-concurrency
//! token handed back to the writer.

use crate::event::{Event, EventSequence};
use crate::timestamp::Timestamp;
use crate::types::{ObjectId, Revision};
use std::sync::Arc;

/// Immutable record of one append to a stream
#[derive(Debug, Clone)]
pub struct Commit {
    commit_id: ObjectId,
    stream_id: ObjectId,
    version: Revision,
    sequence_number: u64,
    events: Arc<[Event]>,
    timestamp: Timestamp,
}

impl Commit {
    /// Create a commit record
    pub fn new(
        commit_id: ObjectId,
        stream_id: ObjectId,
        version: Revision,
        sequence_number: u64,
        events: EventSequence,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            commit_id,
            stream_id,
            version,
            sequence_number,
            events: events.into(),
            timestamp,
        }
    }

    /// Unique id of this commit
    pub fn commit_id(&self) -> ObjectId {
        self.commit_id
    }

    /// Identity of the stream written to
    pub fn stream_id(&self) -> ObjectId {
        self.stream_id
    }

    /// Stream version before the commit
    pub fn version(&self) -> Revision {
        self.version
    }

    /// Stream version after the commit
    pub fn next_version(&self) -> Revision {
        self.version + self.events.len() as Revision
    }

    /// Global ordering hint
    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    /// The committed events, in commit order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// True if the commit carried no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// When the commit was made
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}
