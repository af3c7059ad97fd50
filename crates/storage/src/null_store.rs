//! A store that holds nothing
//!
//! `has` is always false, `get` always fails with NotFound and `put` discards
//! its argument. Useful as an event source when writes must go nowhere, or as
//! a stand-in wherever a [`Store`] is required but no data exists.

use eventide_core::{Error, ObjectId, Result, Revision, Store};
use std::fmt;
use std::marker::PhantomData;

/// Empty store of `T`
pub struct NullStore<T> {
    _value: PhantomData<fn() -> T>,
}

impl<T> NullStore<T> {
    /// Create a null store
    pub const fn new() -> Self {
        Self { _value: PhantomData }
    }
}

impl<T> Default for NullStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for NullStore<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for NullStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NullStore")
    }
}

impl<T> Store for NullStore<T> {
    type Value = T;

    fn has(&self, _id: ObjectId) -> bool {
        false
    }

    fn get_at(&self, id: ObjectId, _version: Revision) -> Result<T> {
        if id.is_null() {
            return Err(Error::NullIdentity("id"));
        }
        Err(Error::NotFound(id))
    }

    fn put(&self, _value: &mut T) -> Result<()> {
        Ok(())
    }
}
