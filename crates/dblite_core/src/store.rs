//! Store facade.

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::field::Field;
use crate::identifier::Identifier;
use crate::pin::Pin;
use crate::snapshot;
use dblite_codec::Value;
use dblite_storage::{SnapshotBackend, StorageError};
use std::fmt;
use std::path::{Path, PathBuf};

/// Path used when no path is given.
pub const DEFAULT_PATH: &str = "database.dbl";

/// Path used for copies when no path is given.
pub const DEFAULT_COPY_PATH: &str = "copebase.dbl";

/// The main database handle.
///
/// A `Store` owns an ordered list of [`Field`]s, an optional [`Pin`] and the
/// backend its snapshot lives in. All operations run in memory; nothing is
/// durable until [`Store::persist`] rewrites the whole snapshot.
///
/// Field names are not unique. Lookups by name resolve to the first field
/// with that name.
///
/// # Example
///
/// ```rust,no_run
/// use dblite_core::{Pin, Store, Value};
///
/// let mut store = Store::create("t.dbl", Some(Pin::new(1234)), Vec::new())?;
/// store.add_field("users");
/// store.add("users", Value::map(vec![("name".into(), "Alice".into())]), 1)?;
/// store.persist()?;
///
/// let store = Store::connect("t.dbl", Some(Pin::new(1234)))?;
/// assert_eq!(store.get("users", 1)?.get("name"), Some(&Value::from("Alice")));
/// # Ok::<(), dblite_core::CoreError>(())
/// ```
pub struct Store {
    path: PathBuf,
    pin: Option<Pin>,
    fields: Vec<Field>,
    config: Config,
    backend: Box<dyn SnapshotBackend>,
}

impl Store {
    /// Creates a store at `path` and writes its initial snapshot.
    ///
    /// An existing file at `path` is overwritten.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the snapshot cannot be written.
    pub fn create(
        path: impl AsRef<Path>,
        pin: Option<Pin>,
        fields: Vec<Field>,
    ) -> CoreResult<Self> {
        Self::create_with_config(path, pin, fields, Config::default())
    }

    /// Creates a store at `path` with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the snapshot cannot be written.
    pub fn create_with_config(
        path: impl AsRef<Path>,
        pin: Option<Pin>,
        fields: Vec<Field>,
        config: Config,
    ) -> CoreResult<Self> {
        let path = path.as_ref();
        let backend = config.file_backend(path);
        Self::create_inner(path.to_path_buf(), pin, fields, config, Box::new(backend))
    }

    /// Creates a store on an arbitrary backend.
    ///
    /// `path` is recorded in the snapshot and used in error messages.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the snapshot cannot be written.
    pub fn create_with_backend(
        path: impl Into<PathBuf>,
        pin: Option<Pin>,
        fields: Vec<Field>,
        backend: impl SnapshotBackend + 'static,
    ) -> CoreResult<Self> {
        Self::create_inner(
            path.into(),
            pin,
            fields,
            Config::default(),
            Box::new(backend),
        )
    }

    fn create_inner(
        path: PathBuf,
        pin: Option<Pin>,
        fields: Vec<Field>,
        config: Config,
        backend: Box<dyn SnapshotBackend>,
    ) -> CoreResult<Self> {
        let mut store = Self {
            path,
            pin,
            fields,
            config,
            backend,
        };
        store.persist()?;
        tracing::debug!(
            path = %store.path.display(),
            fields = store.fields.len(),
            "created database"
        );
        Ok(store)
    }

    /// Connects to the store at `path`.
    ///
    /// # Errors
    ///
    /// - `DatabaseNotFound` if the file cannot be opened
    /// - `PinMismatch` if `pin` differs from the stored pin
    /// - `InvalidFormat` or a codec error if the file is not a snapshot
    pub fn connect(path: impl AsRef<Path>, pin: Option<Pin>) -> CoreResult<Self> {
        Self::connect_with_config(path, pin, Config::default())
    }

    /// Connects to the store at `path` with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Same as [`Store::connect`].
    pub fn connect_with_config(
        path: impl AsRef<Path>,
        pin: Option<Pin>,
        config: Config,
    ) -> CoreResult<Self> {
        let path = path.as_ref();
        let backend = config.file_backend(path);
        Self::connect_inner(path.to_path_buf(), pin, config, Box::new(backend))
    }

    /// Connects to a store held by an arbitrary backend.
    ///
    /// # Errors
    ///
    /// Same as [`Store::connect`].
    pub fn connect_with_backend(
        path: impl Into<PathBuf>,
        pin: Option<Pin>,
        backend: impl SnapshotBackend + 'static,
    ) -> CoreResult<Self> {
        Self::connect_inner(path.into(), pin, Config::default(), Box::new(backend))
    }

    fn connect_inner(
        path: PathBuf,
        pin: Option<Pin>,
        config: Config,
        backend: Box<dyn SnapshotBackend>,
    ) -> CoreResult<Self> {
        let data = backend.read().map_err(|err| match err {
            StorageError::NotFound { .. } => CoreError::DatabaseNotFound { path: path.clone() },
            other => CoreError::Storage(other),
        })?;
        let snapshot = snapshot::decode(&data)?;

        if snapshot.pin != pin {
            return Err(CoreError::PinMismatch { pin });
        }

        if snapshot.path != path {
            tracing::warn!(
                opened = %path.display(),
                recorded = %snapshot.path.display(),
                "database was written under a different path"
            );
        }

        tracing::debug!(
            path = %path.display(),
            fields = snapshot.fields.len(),
            "connected to database"
        );

        Ok(Self {
            path,
            pin,
            fields: snapshot.fields,
            config,
            backend,
        })
    }

    /// Returns the database path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the pin.
    #[must_use]
    pub fn pin(&self) -> Option<Pin> {
        self.pin
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns all fields in order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns all field names in order, duplicates included.
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(Field::name).collect()
    }

    /// Returns the first field named `name`.
    ///
    /// # Errors
    ///
    /// Returns `FieldNotFound` if no field has that name.
    pub fn get_field(&self, name: &str) -> CoreResult<&Field> {
        self.fields
            .iter()
            .find(|field| field.matches(name))
            .ok_or_else(|| CoreError::field_not_found(name, &self.path))
    }

    /// Returns the first field named `name`, mutably.
    ///
    /// # Errors
    ///
    /// Returns `FieldNotFound` if no field has that name.
    pub fn get_field_mut(&mut self, name: &str) -> CoreResult<&mut Field> {
        match self.position(name) {
            Some(index) => Ok(&mut self.fields[index]),
            None => Err(CoreError::field_not_found(name, &self.path)),
        }
    }

    /// Returns the value stored under `identifier` in field `field_name`.
    ///
    /// # Errors
    ///
    /// Returns `FieldNotFound` or `IdentifierNotFound`.
    pub fn get(&self, field_name: &str, identifier: impl Into<Identifier>) -> CoreResult<&Value> {
        self.get_field(field_name)?.get(identifier)
    }

    /// Stores `value` under `identifier` in field `field_name`.
    ///
    /// # Errors
    ///
    /// Returns `FieldNotFound`, or `InvalidValue` for a database snapshot.
    pub fn add(
        &mut self,
        field_name: &str,
        value: impl Into<Value>,
        identifier: impl Into<Identifier>,
    ) -> CoreResult<()> {
        self.get_field_mut(field_name)?.add(identifier, value)
    }

    /// Appends an empty field with a random identity.
    ///
    /// Names are not checked for uniqueness.
    pub fn add_field(&mut self, name: impl Into<String>) -> &mut Field {
        self.fields.push(Field::new(name));
        let last = self.fields.len() - 1;
        &mut self.fields[last]
    }

    /// Removes and returns the first field named `name`.
    ///
    /// # Errors
    ///
    /// Returns `FieldNotFound` if no field has that name.
    pub fn remove_field(&mut self, name: &str) -> CoreResult<Field> {
        match self.position(name) {
            Some(index) => Ok(self.fields.remove(index)),
            None => Err(CoreError::field_not_found(name, &self.path)),
        }
    }

    /// Returns the value form of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Value {
        snapshot::to_value(&self.path, self.pin, &self.fields)
    }

    /// Rewrites the whole snapshot.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails, or a codec error if an
    /// entry holds a NaN float.
    pub fn persist(&mut self) -> CoreResult<()> {
        let bytes = snapshot::encode(&self.snapshot())?;
        self.backend.write(&bytes)?;
        tracing::debug!(
            path = %self.path.display(),
            fields = self.fields.len(),
            bytes = bytes.len(),
            "persisted database"
        );
        Ok(())
    }

    /// Persists this store, then creates a copy at `new_path`.
    ///
    /// The copy holds deep clones of every field with fresh identities and
    /// shares this store's configuration.
    ///
    /// # Errors
    ///
    /// Returns a storage error if either snapshot cannot be written.
    pub fn copy(&mut self, new_path: impl AsRef<Path>, new_pin: Option<Pin>) -> CoreResult<Self> {
        let fields = self.prepare_copy()?;
        let copy = Self::create_with_config(new_path, new_pin, fields, self.config.clone())?;
        tracing::debug!(
            from = %self.path.display(),
            to = %copy.path.display(),
            "copied database"
        );
        Ok(copy)
    }

    /// Persists this store, then creates a copy on another backend.
    ///
    /// # Errors
    ///
    /// Returns a storage error if either snapshot cannot be written.
    pub fn copy_with_backend(
        &mut self,
        new_path: impl Into<PathBuf>,
        new_pin: Option<Pin>,
        backend: impl SnapshotBackend + 'static,
    ) -> CoreResult<Self> {
        let fields = self.prepare_copy()?;
        Self::create_with_backend(new_path, new_pin, fields, backend)
    }

    fn prepare_copy(&mut self) -> CoreResult<Vec<Field>> {
        self.persist()?;
        let mut fields = self.fields.clone();
        for field in &mut fields {
            field.regenerate_identity();
        }
        Ok(fields)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.matches(name))
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("path", &self.path)
            .field("pin", &self.pin)
            .field("fields", &self.field_names())
            .field("backend", &self.backend.describe())
            .finish()
    }
}
