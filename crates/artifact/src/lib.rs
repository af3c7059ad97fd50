//! Event-recording domain objects for eventide
//!
//! - EventDispatcher: per-event-type handler registry, shared by artifacts
//! - Artifact: state plus the uncommitted events that changed it
//! - Aggregate: artifact with identity and revision, the unit of persistence
//! - AggregateRoot: the contract the artifact store persists through

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregate;
pub mod artifact;
pub mod dispatcher;

pub use aggregate::{Aggregate, AggregateRoot};
pub use artifact::Artifact;
pub use dispatcher::{EventDispatcher, Handler};
