//! Type-erased event envelope
//!
//! An [`Event`] carries exactly one domain payload of any concrete type. The
//! payload type is erased so heterogeneous events can share one collection
//! (uncommitted buffers, streams, commits), but the concrete type survives as
//! an [`EventType`] discriminator. Dispatchers route on the discriminator and
//! handlers recover the payload with [`Event::downcast_ref`].
//!
//! Events are immutable. Cloning an Event clones a reference to the same
//! payload, so the envelope can sit in an uncommitted buffer, a stream and a
//! commit at once without copying the payload.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Run-time discriminator of an event payload's concrete type
///
/// Equality and hashing use the payload's `TypeId` only; the type name is kept
/// for logs and for tagging persisted events.
#[derive(Clone, Copy)]
pub struct EventType {
    id: TypeId,
    name: &'static str,
}

impl EventType {
    /// Discriminator for payload type `E`
    pub fn of<E: Any>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: std::any::type_name::<E>(),
        }
    }

    /// Fully qualified name of the payload type
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True if this discriminator belongs to payload type `E`
    #[inline]
    pub fn is<E: Any>(&self) -> bool {
        self.id == TypeId::of::<E>()
    }
}

impl PartialEq for EventType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EventType {}

impl Hash for EventType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventType").field(&self.name).finish()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Ordered collection of events, oldest first
pub type EventSequence = Vec<Event>;

/// An immutable domain event with its type discriminator
#[derive(Clone)]
pub struct Event {
    event_type: EventType,
    payload: Arc<dyn Any + Send + Sync>,
}

impl Event {
    /// Wrap a payload
    pub fn new<E: Any + Send + Sync>(payload: E) -> Self {
        Self {
            event_type: EventType::of::<E>(),
            payload: Arc::new(payload),
        }
    }

    /// Discriminator of the wrapped payload
    #[inline]
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// True if the payload is an `E`
    #[inline]
    pub fn is<E: Any>(&self) -> bool {
        self.event_type.is::<E>()
    }

    /// Borrow the payload as `E`
    ///
    /// Returns None when the discriminator does not match.
    pub fn downcast_ref<E: Any>(&self) -> Option<&E> {
        self.payload.downcast_ref::<E>()
    }

    /// True if both envelopes share the same payload allocation
    pub fn ptr_eq(&self, other: &Event) -> bool {
        Arc::ptr_eq(&self.payload, &other.payload)
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("event_type", &self.event_type.name)
            .finish_non_exhaustive()
    }
}
