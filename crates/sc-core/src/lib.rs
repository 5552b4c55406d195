//! Core plumbing for Scavenger: the key-value store capability that every
//! session persists through, and small text helpers shared by the renderers.
//!
//! Nothing in here knows about scavenging or encounters. The engine crates
//! take a [`KeyValueStore`] as a dependency instead of reaching into a
//! global, so tests can run against a [`MemoryStore`] and the CLI against a
//! [`FileStore`].

/// Error types used throughout the crate.
pub mod error;
/// The key-value store capability and its implementations.
pub mod storage;
/// Text formatting helpers.
pub mod text;

/// Re-export error types.
pub use error::{StoreError, StoreResult};
/// Re-export store types.
pub use storage::{FileStore, KeyValueStore, MemoryStore};
/// Re-export text helpers.
pub use text::sentence_case;
