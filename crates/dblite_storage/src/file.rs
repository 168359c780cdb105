//! File-based snapshot backend.

use crate::backend::SnapshotBackend;
use crate::error::{StorageError, StorageResult};
use fs2::FileExt;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A file-based snapshot backend.
///
/// Each write replaces the whole file using the write-then-rename pattern:
/// 1. Write the snapshot to `<path>.tmp`
/// 2. Sync the temporary file
/// 3. Rename it over `<path>`
/// 4. Sync the parent directory so the rename is durable
///
/// # Locking
///
/// No locking happens by default; two writers on the same path race and the
/// last rename wins. With [`FileBackend::with_lock`] each write holds an
/// exclusive advisory lock on `<path>.lock` and fails fast with
/// [`StorageError::Locked`] if another handle holds it.
///
/// # Example
///
/// ```no_run
/// use dblite_storage::{FileBackend, SnapshotBackend};
///
/// let mut backend = FileBackend::new("data.dbl");
/// backend.write(b"snapshot").unwrap();
/// assert_eq!(backend.read().unwrap(), b"snapshot");
/// ```
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
    sync: bool,
    lock: bool,
    create_dirs: bool,
}

impl FileBackend {
    /// Creates a backend for `path` without touching the filesystem.
    ///
    /// Syncing is on, locking and parent directory creation are off.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sync: true,
            lock: false,
            create_dirs: false,
        }
    }

    /// Creates a backend for an existing snapshot file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the file cannot be opened for
    /// reading.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let backend = Self::new(path);
        File::open(&backend.path).map_err(|_| StorageError::NotFound {
            path: backend.path.clone(),
        })?;
        Ok(backend)
    }

    /// Sets whether writes are synced to disk before returning.
    #[must_use]
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// Sets whether writes hold an exclusive lock on `<path>.lock`.
    #[must_use]
    pub fn with_lock(mut self, lock: bool) -> Self {
        self.lock = lock;
        self
    }

    /// Sets whether missing parent directories are created on write.
    #[must_use]
    pub fn with_create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }

    /// Returns the path to the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the path of the temporary file used while writing.
    #[must_use]
    pub fn temp_path(&self) -> PathBuf {
        self.sibling(".tmp")
    }

    /// Returns the path of the sidecar lock file.
    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        self.sibling(".lock")
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(suffix);
        PathBuf::from(name)
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn acquire_lock(&self) -> StorageResult<File> {
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path())?;

        if lock_file.try_lock_exclusive().is_err() {
            return Err(StorageError::Locked {
                path: self.path.clone(),
            });
        }
        Ok(lock_file)
    }

    fn replace(&self, data: &[u8]) -> StorageResult<()> {
        let temp_path = self.temp_path();

        // Any failure before the rename completes leaves no temp file behind.
        let staged = self
            .stage(&temp_path, data)
            .and_then(|()| fs::rename(&temp_path, &self.path));
        if let Err(err) = staged {
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }

        if self.sync {
            sync_directory(self.parent_dir())?;
        }
        Ok(())
    }

    fn stage(&self, temp_path: &Path, data: &[u8]) -> io::Result<()> {
        let mut file = File::create(temp_path)?;
        file.write_all(data)?;
        if self.sync {
            file.sync_all()
        } else {
            file.flush()
        }
    }
}

impl SnapshotBackend for FileBackend {
    fn read(&self) -> StorageResult<Vec<u8>> {
        fs::read(&self.path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => StorageError::NotFound {
                path: self.path.clone(),
            },
            _ => StorageError::Io(err),
        })
    }

    fn write(&mut self, data: &[u8]) -> StorageResult<()> {
        if self.create_dirs {
            fs::create_dir_all(self.parent_dir())?;
        }

        let lock_file = if self.lock {
            Some(self.acquire_lock()?)
        } else {
            None
        };

        let result = self.replace(data);

        if let Some(lock_file) = lock_file {
            lock_file.unlock()?;
        }

        result?;
        tracing::trace!(path = %self.path.display(), bytes = data.len(), "snapshot written");
        Ok(())
    }

    fn size(&self) -> StorageResult<u64> {
        let metadata = fs::metadata(&self.path).map_err(|_| StorageError::NotFound {
            path: self.path.clone(),
        })?;
        Ok(metadata.len())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Syncs a directory so that renames inside it are durable.
///
/// Windows NTFS journals metadata operations and does not support
/// directory fsync, so this is a no-op there.
#[cfg(unix)]
fn sync_directory(dir: &Path) -> StorageResult<()> {
    File::open(dir)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_directory(_dir: &Path) -> StorageResult<()> {
    Ok(())
}
