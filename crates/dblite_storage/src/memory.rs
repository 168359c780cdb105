//! In-memory snapshot backend for testing.

use crate::backend::SnapshotBackend;
use crate::error::{StorageError, StorageResult};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;

/// An in-memory snapshot backend.
///
/// Clones share the same buffer, so a test can hand one clone to a store and
/// keep another to reconnect or inspect the bytes.
///
/// # Example
///
/// ```rust
/// use dblite_storage::{SnapshotBackend, InMemoryBackend};
///
/// let mut backend = InMemoryBackend::new();
/// let observer = backend.clone();
/// backend.write(b"test data").unwrap();
/// assert_eq!(observer.size().unwrap(), 9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    data: Arc<RwLock<Option<Vec<u8>>>>,
}

impl InMemoryBackend {
    /// Location reported in errors and diagnostics.
    pub const LOCATION: &'static str = ":memory:";

    /// Creates a new backend with no snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory backend holding a pre-existing snapshot.
    #[must_use]
    pub fn with_data(data: Vec<u8>) -> Self {
        Self {
            data: Arc::new(RwLock::new(Some(data))),
        }
    }

    /// Returns a copy of the current snapshot, if any.
    #[must_use]
    pub fn data(&self) -> Option<Vec<u8>> {
        self.data.read().clone()
    }

    /// Drops the snapshot, as if the file had been deleted.
    pub fn clear(&self) {
        *self.data.write() = None;
    }

    fn not_found() -> StorageError {
        StorageError::NotFound {
            path: PathBuf::from(Self::LOCATION),
        }
    }
}

impl SnapshotBackend for InMemoryBackend {
    fn read(&self) -> StorageResult<Vec<u8>> {
        self.data.read().clone().ok_or_else(Self::not_found)
    }

    fn write(&mut self, data: &[u8]) -> StorageResult<()> {
        *self.data.write() = Some(data.to_vec());
        Ok(())
    }

    fn size(&self) -> StorageResult<u64> {
        self.data
            .read()
            .as_ref()
            .map(|data| data.len() as u64)
            .ok_or_else(Self::not_found)
    }

    fn describe(&self) -> String {
        Self::LOCATION.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_new_has_no_snapshot() {
        let backend = InMemoryBackend::new();
        assert!(backend.data().is_none());
        assert!(matches!(backend.read(), Err(StorageError::NotFound { .. })));
        assert!(matches!(backend.size(), Err(StorageError::NotFound { .. })));
    }

    #[test]
    fn memory_write_replaces() {
        let mut backend = InMemoryBackend::new();
        backend.write(b"hello world").unwrap();
        backend.write(b"bye").unwrap();

        assert_eq!(backend.read().unwrap(), b"bye");
        assert_eq!(backend.size().unwrap(), 3);
    }

    #[test]
    fn memory_clones_share_buffer() {
        let mut writer = InMemoryBackend::new();
        let reader = writer.clone();

        writer.write(b"shared").unwrap();
        assert_eq!(reader.read().unwrap(), b"shared");

        reader.clear();
        assert!(writer.data().is_none());
    }

    #[test]
    fn memory_with_data() {
        let backend = InMemoryBackend::with_data(b"preloaded".to_vec());
        assert_eq!(backend.size().unwrap(), 9);
        assert_eq!(backend.read().unwrap(), b"preloaded");
        assert_eq!(backend.describe(), ":memory:");
    }
}
