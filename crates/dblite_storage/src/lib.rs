//! # DBLite Storage
//!
//! Snapshot backends for DBLite.
//!
//! A DBLite database lives in exactly one snapshot that is rewritten as a
//! whole on every persist. Backends are **opaque byte stores** for that one
//! snapshot; they do not interpret the bytes.
//!
//! ## Design Principles
//!
//! - Backends hold one snapshot (read, replace)
//! - No partial writes, no appends
//! - Must be `Send + Sync`
//! - DBLite owns all file format interpretation
//!
//! ## Available Backends
//!
//! - [`FileBackend`] - One file per database, crash-safe replace
//! - [`InMemoryBackend`] - For testing and ephemeral databases
//!
//! ## Example
//!
//! ```rust
//! use dblite_storage::{SnapshotBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! backend.write(b"hello world").unwrap();
//! assert_eq!(backend.read().unwrap(), b"hello world");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::SnapshotBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
