//! Core traits for store and stream abstraction
//!
//! These traits are the seams between the artifact store and whatever
//! physically keeps events:
//! - [`Store`]: keyed `has/get/put` container, implemented both by event
//!   sources (id → stream) and by the artifact store (id → aggregate)
//! - [`EventStream`]: per-identity ordered log with two-phase save/persist
//! - [`StreamFactory`] / [`ObjectFactory`]: constructors the artifact store
//!   calls for first writes and for aggregate shells
//!
//! Conformance is structural and checked at compile time: the artifact store
//! only accepts an event source whose `Store::Value` implements
//! [`EventStream`], so an incompatible substitution fails to build.

use crate::commit::Commit;
use crate::error::{Error, Result};
use crate::event::{Event, EventSequence};
use crate::types::{ObjectId, Revision, MAX_REVISION};
use std::sync::Arc;

/// Keyed container of values addressed by [`ObjectId`]
pub trait Store {
    /// What the store holds
    type Value;

    /// True if a value exists for `id`
    ///
    /// Always false for the null id; never fails.
    fn has(&self, id: ObjectId) -> bool;

    /// Latest value for `id`
    ///
    /// # Errors
    ///
    /// [`Error::NullIdentity`] for the null id, [`Error::NotFound`] when
    /// `has(id)` would be false.
    fn get(&self, id: ObjectId) -> Result<Self::Value> {
        self.get_at(id, MAX_REVISION)
    }

    /// Value for `id` reconstructed only up to `version`
    ///
    /// # Errors
    ///
    /// Same as [`Store::get`].
    fn get_at(&self, id: ObjectId, version: Revision) -> Result<Self::Value>;

    /// Upsert `value`, keyed by its own identity
    ///
    /// Takes `&mut` because a put may hand state back to the value (the
    /// artifact store drains the aggregate's uncommitted events).
    ///
    /// # Errors
    ///
    /// [`Error::NullIdentity`] if the value carries the null id, otherwise
    /// whatever the backend reports.
    fn put(&self, value: &mut Self::Value) -> Result<()>;

    /// [`Store::put`] for callers that may hold no value at all
    ///
    /// # Errors
    ///
    /// [`Error::NullPointer`] when `value` is None.
    fn put_opt(&self, value: Option<&mut Self::Value>) -> Result<()> {
        match value {
            Some(value) => self.put(value),
            None => Err(Error::NullPointer("value")),
        }
    }
}

impl<S: Store + ?Sized> Store for Arc<S> {
    type Value = S::Value;

    fn has(&self, id: ObjectId) -> bool {
        (**self).has(id)
    }

    fn get(&self, id: ObjectId) -> Result<Self::Value> {
        (**self).get(id)
    }

    fn get_at(&self, id: ObjectId, version: Revision) -> Result<Self::Value> {
        (**self).get_at(id, version)
    }

    fn put(&self, value: &mut Self::Value) -> Result<()> {
        (**self).put(value)
    }
}

/// Durable, ordered event history of one identity
///
/// Stream-local revisions start at 1; a stream holding `n` events is at
/// version `n`.
pub trait EventStream {
    /// Identity this stream belongs to
    fn id(&self) -> ObjectId;

    /// Durable version this handle is based on
    fn version(&self) -> Revision;

    /// Events whose revision lies in the closed window `[min_revision, max_revision]`
    ///
    /// Results keep commit order. `0..=MAX_REVISION` loads everything; an
    /// empty or inverted window yields an empty sequence, not an error.
    fn load(&self, min_revision: Revision, max_revision: Revision) -> Result<EventSequence>;

    /// Append events to the pending buffer without making them durable
    fn save(&mut self, events: &[Event]) -> Result<()>;

    /// Flush the pending buffer, producing exactly one [`Commit`]
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrencyConflict`] if the durable version moved past
    /// [`EventStream::version`] since this handle observed it. Nothing is
    /// written in that case.
    fn persist(&mut self) -> Result<Commit>;
}

/// Builds a brand-new empty stream for an identity with no history
pub trait StreamFactory<St> {
    /// Create the stream for `id`
    fn create_stream(&self, id: ObjectId) -> St;
}

impl<St, F> StreamFactory<St> for F
where
    F: Fn(ObjectId) -> St,
{
    fn create_stream(&self, id: ObjectId) -> St {
        self(id)
    }
}

/// Builds an aggregate shell, not yet replayed
///
/// The shell may already be materialized up to any revision `<= revision`
/// (for instance from a snapshot); the artifact store replays only the gap.
pub trait ObjectFactory<A> {
    /// Create the shell for `id` targeting `revision`
    fn create_object(&self, id: ObjectId, revision: Revision) -> A;
}

impl<A, F> ObjectFactory<A> for F
where
    F: Fn(ObjectId, Revision) -> A,
{
    fn create_object(&self, id: ObjectId, revision: Revision) -> A {
        self(id, revision)
    }
}
