//! Error types for storage operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The snapshot could not be opened for reading.
    #[error("snapshot not found: {}", path.display())]
    NotFound {
        /// Location that was opened.
        path: PathBuf,
    },

    /// Another handle holds the write lock.
    #[error("snapshot locked by another process: {}", path.display())]
    Locked {
        /// Path of the snapshot being written.
        path: PathBuf,
    },
}
