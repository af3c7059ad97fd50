//! Artifact store: aggregates persisted as event streams
//!
//! The store composes three collaborators:
//! - an event source: any [`Store`] whose values are [`EventStream`]s
//! - a stream factory: builds the stream for an identity's first write
//! - an object factory: builds an aggregate shell for `(id, revision)`
//!
//! ## Read path
//!
//! ```text
//! get_at(id, v)
//!   shell = object_factory(id, v)
//!   IF shell.revision() >= v: done, no stream is touched
//!   stream = event_source.get(id)            NotFound if never written
//!   replay stream.load(shell.revision() + 1, v) into the shell
//! ```
//!
//! ## Write path
//!
//! ```text
//! put(aggregate)
//!   nothing uncommitted: done, nothing written
//!   stream = event_source.has(id) ? event_source.get(id) : stream_factory(id)
//!   IF stream.version() != aggregate.committed_revision(): ConcurrencyConflict
//!   stream.save(uncommitted); stream.persist()
//!   event_source.put(stream)
//!   aggregate.clear_uncommitted_events()
//! ```
//!
//! Every failure surfaces before the aggregate's buffer is cleared, so a
//! rejected put leaves the aggregate exactly as it was. The store itself holds
//! no locks; concurrent writers are ordered by the stream's persist.

use crate::config::StoreConfig;
use eventide_artifact::AggregateRoot;
use eventide_core::{
    Commit, Error, EventStream, ObjectFactory, ObjectId, Result, Revision, Store, StreamFactory,
};
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, info, warn};

/// Store of aggregates backed by an event source
pub struct ArtifactStore<A, ES, SF, OF> {
    event_source: ES,
    stream_factory: SF,
    object_factory: OF,
    config: StoreConfig,
    _aggregate: PhantomData<fn() -> A>,
}

impl<A, ES, SF, OF> ArtifactStore<A, ES, SF, OF>
where
    A: AggregateRoot,
    ES: Store,
    ES::Value: EventStream,
    SF: StreamFactory<ES::Value>,
    OF: ObjectFactory<A>,
{
    /// Create a store with the default configuration
    pub fn new(event_source: ES, stream_factory: SF, object_factory: OF) -> Self {
        Self {
            event_source,
            stream_factory,
            object_factory,
            config: StoreConfig::default(),
            _aggregate: PhantomData,
        }
    }

    /// Create a store with an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration does not validate.
    pub fn with_config(
        event_source: ES,
        stream_factory: SF,
        object_factory: OF,
        config: StoreConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            event_source,
            stream_factory,
            object_factory,
            config,
            _aggregate: PhantomData,
        })
    }

    /// The event source streams are read from and written back to
    pub fn event_source(&self) -> &ES {
        &self.event_source
    }

    /// Active configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Persist the aggregate's uncommitted events, returning the commit
    ///
    /// Returns `Ok(None)` when there was nothing to write.
    ///
    /// # Errors
    ///
    /// [`Error::NullIdentity`] for an aggregate with the null id,
    /// [`Error::ConcurrencyConflict`] if another writer advanced the stream
    /// since the aggregate was loaded, and any error raised by the stream or
    /// event source. The aggregate keeps its uncommitted events on error.
    pub fn commit(&self, object: &mut A) -> Result<Option<Commit>> {
        let id = object.id();
        if id.is_null() {
            return Err(Error::NullIdentity("object.id()"));
        }
        if !object.has_uncommitted_events() {
            debug!(target: "eventide::store", id = %id, "Nothing to commit");
            return Ok(None);
        }

        let mut stream = self.open_stream(id)?;
        let expected = object.committed_revision();
        if self.config.optimistic_concurrency && stream.version() != expected {
            warn!(
                target: "eventide::store",
                id = %id,
                expected,
                actual = stream.version(),
                "Aggregate is behind its stream"
            );
            return Err(Error::ConcurrencyConflict {
                id,
                expected,
                actual: stream.version(),
            });
        }

        stream.save(object.uncommitted_events())?;
        let commit = stream.persist()?;
        self.event_source.put(&mut stream)?;
        object.clear_uncommitted_events();

        info!(
            target: "eventide::store",
            id = %id,
            version = commit.version(),
            events = commit.events().len(),
            sequence_number = commit.sequence_number(),
            "Committed aggregate"
        );
        Ok(Some(commit))
    }

    fn open_stream(&self, id: ObjectId) -> Result<ES::Value> {
        if self.event_source.has(id) {
            self.event_source.get(id)
        } else {
            debug!(target: "eventide::store", id = %id, "Creating stream for first write");
            Ok(self.stream_factory.create_stream(id))
        }
    }

    /// Replay `[object.revision() + 1, target]` from `stream` into `object`
    ///
    /// Windows advance over stream revisions, not over what the object
    /// reports, so every revision is loaded at most once.
    fn replay(&self, stream: &ES::Value, object: &mut A, target: Revision) -> Result<usize> {
        let mut replayed = 0;
        let mut min_revision = object.revision().saturating_add(1);
        while min_revision <= target {
            let max_revision = match self.config.replay_batch_size {
                Some(batch) => min_revision.saturating_add(batch - 1).min(target),
                None => target,
            };
            let events = stream.load(min_revision, max_revision)?;
            let loaded = events.len() as Revision;
            replayed += object.load_from_history(events);
            // A short read means the stream ends inside this window.
            if loaded <= max_revision - min_revision || max_revision == Revision::MAX {
                break;
            }
            min_revision = max_revision + 1;
        }
        Ok(replayed)
    }
}

impl<A, ES, SF, OF> Store for ArtifactStore<A, ES, SF, OF>
where
    A: AggregateRoot,
    ES: Store,
    ES::Value: EventStream,
    SF: StreamFactory<ES::Value>,
    OF: ObjectFactory<A>,
{
    type Value = A;

    fn has(&self, id: ObjectId) -> bool {
        !id.is_null() && self.event_source.has(id)
    }

    fn get_at(&self, id: ObjectId, version: Revision) -> Result<A> {
        if id.is_null() {
            return Err(Error::NullIdentity("id"));
        }

        let mut object = self.object_factory.create_object(id, version);
        let base = object.revision();
        if base >= version {
            debug!(
                target: "eventide::store",
                id = %id,
                revision = base,
                "Object factory already at target revision"
            );
            return Ok(object);
        }

        let stream = self.event_source.get(id)?;
        let replayed = self.replay(&stream, &mut object, version)?;
        debug!(
            target: "eventide::store",
            id = %id,
            from = base,
            to = object.revision(),
            replayed,
            "Replayed aggregate"
        );
        Ok(object)
    }

    fn put(&self, object: &mut A) -> Result<()> {
        self.commit(object).map(|_| ())
    }
}

impl<A, ES: fmt::Debug, SF, OF> fmt::Debug for ArtifactStore<A, ES, SF, OF> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactStore")
            .field("event_source", &self.event_source)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
