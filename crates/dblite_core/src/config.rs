//! Store configuration.

use dblite_storage::FileBackend;
use std::path::Path;

/// Configuration for creating or connecting a store.
///
/// Configuration only affects how snapshots are written; it is never
/// persisted and a store can be reconnected with different settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Whether to fsync the snapshot and its directory on every persist.
    pub sync_on_persist: bool,

    /// Whether to hold an exclusive lock on `<path>.lock` while persisting.
    pub lock_on_persist: bool,

    /// Whether to create missing parent directories on persist.
    pub create_parent_dirs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sync_on_persist: true,
            lock_on_persist: false,
            create_parent_dirs: false,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to sync on every persist.
    #[must_use]
    pub const fn sync_on_persist(mut self, value: bool) -> Self {
        self.sync_on_persist = value;
        self
    }

    /// Sets whether persisting takes the sidecar lock.
    #[must_use]
    pub const fn lock_on_persist(mut self, value: bool) -> Self {
        self.lock_on_persist = value;
        self
    }

    /// Sets whether missing parent directories are created.
    #[must_use]
    pub const fn create_parent_dirs(mut self, value: bool) -> Self {
        self.create_parent_dirs = value;
        self
    }

    /// Builds a file backend for `path` with these settings applied.
    #[must_use]
    pub fn file_backend(&self, path: &Path) -> FileBackend {
        FileBackend::new(path)
            .with_sync(self.sync_on_persist)
            .with_lock(self.lock_on_persist)
            .with_create_dirs(self.create_parent_dirs)
    }
}
