//! Durable key-value snapshots for the Utagaki session store.
//!
//! The session store keeps each collection (roster, verses, replies, matches,
//! messages, and the active session id) as one entry in a flat key-value
//! snapshot and rewrites the entry after every mutation. This crate provides
//! the storage interface and two backends.
//!
//! # Modules
//!
//! - [`error`] — Error types for snapshot operations
//! - [`keys`] — Key validation and the well-known collection keys
//! - [`traits`] — The [`SnapshotStore`] trait defining the storage interface
//! - [`memory`] — In-memory [`InMemorySnapshotStore`] for tests
//! - [`file`] — Directory-backed [`FileSnapshotStore`] with atomic writes

pub mod error;
pub mod file;
pub mod keys;
pub mod memory;
pub mod traits;

pub use error::{Result, SnapshotError};
pub use file::FileSnapshotStore;
pub use keys::{validate_key, CollectionKey};
pub use memory::InMemorySnapshotStore;
pub use traits::SnapshotStore;
