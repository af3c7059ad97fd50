//! Core types and traits for eventide
//!
//! This crate defines the foundational types used throughout the system:
//! - ObjectId: Nullable identity of an aggregate and its stream
//! - Event / EventType: Type-erased event envelope and its discriminator
//! - Commit: Record of one successful persist
//! - Timestamp: Microsecond commit time
//! - Error: Error taxonomy shared by every layer
//! - Traits: Store, EventStream, StreamFactory, ObjectFactory

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod commit;
pub mod error;
pub mod event;
pub mod timestamp;
pub mod traits;
pub mod types;

pub use commit::Commit;
pub use error::{Error, Result};
pub use event::{Event, EventSequence, EventType};
pub use timestamp::Timestamp;
pub use traits::{EventStream, ObjectFactory, Store, StreamFactory};
pub use types::{ObjectId, Revision, MAX_REVISION};
