//! Identity types
//!
//! - ObjectId: identity of one aggregate and of the event stream that backs it
//! - Revision: count of events reflected in an aggregate's state

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Position in an aggregate's history.
///
/// Revision `n` means "the first `n` events of the stream". Revision 0 is a
/// blank aggregate; stream-local event revisions start at 1.
pub type Revision = u64;

/// Largest representable revision; used as "load everything".
pub const MAX_REVISION: Revision = Revision::MAX;

/// Unique identifier for an aggregate and its event stream
///
/// An ObjectId wraps a UUID. The nil UUID is the distinguished *null* id:
/// stores reject it on every operation, and [`ObjectId::default`] yields it so
/// that an unassigned id can never be mistaken for a real one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// The null id
    pub const NULL: ObjectId = ObjectId(Uuid::nil());

    /// Create a new random ObjectId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The null id (same as [`ObjectId::NULL`])
    pub const fn null() -> Self {
        Self::NULL
    }

    /// Create an ObjectId from raw bytes
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Parse an ObjectId from its string form
    ///
    /// Returns None if the string is not a valid UUID.
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// True for the null id
    #[inline]
    pub fn is_null(&self) -> bool {
        self.0.is_nil()
    }

    /// Get the raw bytes of this ObjectId
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::NULL
    }
}

impl From<Uuid> for ObjectId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
