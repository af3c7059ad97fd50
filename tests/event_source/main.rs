//! Event Source Integration Tests
//!
//! Tests for the stream commit protocol and the in-memory event source,
//! independent of aggregates.

#[path = "../common/mod.rs"]
mod common;

mod null_store;
mod stream_properties;
