//! Test fixtures and store helpers.
//!
//! Provides convenience functions for setting up test stores
//! and common test scenarios.

use dblite_core::{Pin, Store};
use dblite_storage::InMemoryBackend;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Path recorded by in-memory test stores.
pub const MEMORY_PATH: &str = "memory.dbl";

/// A file-backed test store with automatic cleanup.
pub struct TempStore {
    /// The store instance.
    pub store: Store,
    path: PathBuf,
    _temp_dir: TempDir,
}

impl TempStore {
    /// Creates an empty store without a pin in a fresh temporary directory.
    pub fn new() -> Self {
        Self::with_pin(None)
    }

    /// Creates an empty store with the given pin.
    pub fn with_pin(pin: Option<Pin>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("test.dbl");
        let store = Store::create(&path, pin, Vec::new()).expect("Failed to create store");

        Self {
            store,
            path,
            _temp_dir: temp_dir,
        }
    }

    /// Returns the snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the temporary directory holding the store.
    pub fn dir(&self) -> &Path {
        self._temp_dir.path()
    }

    /// Connects a second handle to the persisted snapshot.
    pub fn reconnect(&self) -> Store {
        Store::connect(&self.path, self.store.pin()).expect("Failed to reconnect")
    }
}

impl Default for TempStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TempStore {
    type Target = Store;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

impl std::ops::DerefMut for TempStore {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.store
    }
}

/// Creates an in-memory store and returns it with a handle to its buffer.
///
/// The returned backend shares the store's buffer, so it can be passed to
/// [`Store::connect_with_backend`] to reload what was persisted.
pub fn memory_store(pin: Option<Pin>) -> (Store, InMemoryBackend) {
    let backend = InMemoryBackend::new();
    let store = Store::create_with_backend(MEMORY_PATH, pin, Vec::new(), backend.clone())
        .expect("Failed to create in-memory store");
    (store, backend)
}

/// Runs a test with a temporary file-backed store.
///
/// # Example
///
/// ```rust
/// use dblite_testkit::with_temp_store;
///
/// with_temp_store(|store| {
///     store.add_field("users");
///     assert_eq!(store.field_names(), vec!["users"]);
/// });
/// ```
pub fn with_temp_store<F, R>(f: F) -> R
where
    F: FnOnce(&mut Store) -> R,
{
    let mut temp = TempStore::new();
    f(&mut temp.store)
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;
    use dblite_core::Value;

    /// Creates a store with one field holding `entry_count` entries.
    pub fn populated_store(entry_count: usize) -> TempStore {
        let mut temp = TempStore::new();
        let field = temp.add_field("test");
        for i in 0..entry_count {
            let id = i64::try_from(i).expect("entry count fits in i64");
            field
                .add(id, Value::map(vec![("index".into(), Value::Integer(id))]))
                .expect("Failed to add entry");
        }
        temp.persist().expect("Failed to persist");
        temp
    }

    /// Creates a store with `field_count` fields holding one entry each.
    pub fn multi_field_store(field_count: usize) -> TempStore {
        let mut temp = TempStore::new();
        for i in 0..field_count {
            let name = format!("field_{i}");
            temp.add_field(name.as_str())
                .add("field", name.as_str())
                .expect("Failed to add entry");
        }
        temp.persist().expect("Failed to persist");
        temp
    }
}
