//! Error types for eventide
//!
//! Every failure surfaced by a store, stream or the artifact store is one of
//! these variants. We use `thiserror` for `Display` and `Error`.

use crate::types::{ObjectId, Revision};
use thiserror::Error;

/// Result type alias for eventide operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for eventide
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An operation required an object and received none
    #[error("Null pointer: {0}")]
    NullPointer(&'static str),

    /// An operation received the null identifier
    #[error("Null identity: {0}")]
    NullIdentity(&'static str),

    /// No history is recorded for the identifier
    #[error("Not found: {0}")]
    NotFound(ObjectId),

    /// The stream moved on since the writer last observed it
    #[error("Concurrency conflict on {id}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        /// Stream identity
        id: ObjectId,
        /// Version the writer based its changes on
        expected: Revision,
        /// Durable version at the time of the write
        actual: Revision,
    },

    /// Event source or stream backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for [`Error::ConcurrencyConflict`]; callers reload and retry on these
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::ConcurrencyConflict { .. })
    }

    /// True for [`Error::NotFound`]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
