//! Artifact store engine for eventide
//!
//! This crate ties the lower layers together:
//! - ArtifactStore: get/put of aggregates over any event source, with
//!   partial-revision replay and optimistic concurrency
//! - StoreConfig: `eventide.toml` settings for the store
//!
//! The engine is the only component that knows about both aggregates and
//! streams; the artifact and storage crates never see each other.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod artifact_store;
pub mod config;

pub use artifact_store::ArtifactStore;
pub use config::{StoreConfig, CONFIG_FILE_NAME};
