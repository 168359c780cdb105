//! Storage backend trait definition.

use crate::error::StorageResult;

/// A whole-snapshot storage backend for DBLite.
///
/// Backends are **opaque byte stores** holding exactly one snapshot. They do
/// not interpret the bytes; DBLite owns the file format.
///
/// # Invariants
///
/// - `write` replaces the previous snapshot completely; there are no
///   partial or appending writes
/// - `read` returns exactly the bytes of the last successful `write`
/// - a failed `write` leaves the previous snapshot readable
/// - Backends must be `Send + Sync`
///
/// # Implementors
///
/// - [`super::FileBackend`] - One file per snapshot
/// - [`super::InMemoryBackend`] - For testing
pub trait SnapshotBackend: Send + Sync {
    /// Reads the whole snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no snapshot can be opened, or an
    /// I/O error if reading fails part way.
    fn read(&self) -> StorageResult<Vec<u8>>;

    /// Replaces the snapshot with `data`.
    ///
    /// When this returns successfully the new snapshot has been handed to
    /// durable storage (subject to the backend's sync setting).
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    fn write(&mut self, data: &[u8]) -> StorageResult<()>;

    /// Returns the size of the current snapshot in bytes.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if there is no snapshot.
    fn size(&self) -> StorageResult<u64>;

    /// Human-readable location of the snapshot, used in diagnostics.
    fn describe(&self) -> String;
}
