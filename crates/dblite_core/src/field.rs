//! Named, identifier-keyed field.

use crate::error::{CoreError, CoreResult};
use crate::identifier::Identifier;
use crate::identity::random_identity;
use crate::snapshot;
use dblite_codec::Value;
use indexmap::IndexMap;

/// A named map from [`Identifier`] to [`Value`] inside a store.
///
/// Entries keep insertion order; overwriting an entry keeps its original
/// position. A field also carries a numeric identity, which is independent
/// of its entries and can be regenerated at any time.
///
/// # Example
///
/// ```rust
/// use dblite_core::{Field, Value};
///
/// let mut field = Field::new("users");
/// field.add(1, Value::map(vec![("name".into(), "John".into())])).unwrap();
/// assert_eq!(field.get(1).unwrap().get("name"), Some(&Value::from("John")));
/// ```
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    identity: u64,
    entries: IndexMap<Identifier, Value>,
}

// Entry order is part of a field's contents.
impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.identity == other.identity
            && self.entries.iter().eq(other.entries.iter())
    }
}

impl Field {
    /// Creates an empty field with a random identity.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_identity(name, random_identity())
    }

    /// Creates an empty field with the given identity.
    pub fn with_identity(name: impl Into<String>, identity: u64) -> Self {
        Self {
            name: name.into(),
            identity,
            entries: IndexMap::new(),
        }
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field identity.
    #[must_use]
    pub fn identity(&self) -> u64 {
        self.identity
    }

    /// Returns true if `name` is exactly this field's name.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.name == name
    }

    /// Returns the value stored under `identifier`.
    ///
    /// # Errors
    ///
    /// Returns `IdentifierNotFound` if there is no such entry.
    pub fn get(&self, identifier: impl Into<Identifier>) -> CoreResult<&Value> {
        let identifier = identifier.into();
        self.entries
            .get(&identifier)
            .ok_or(CoreError::IdentifierNotFound { identifier })
    }

    /// Returns true if an entry exists under `identifier`.
    #[must_use]
    pub fn contains(&self, identifier: impl Into<Identifier>) -> bool {
        self.entries.contains_key(&identifier.into())
    }

    /// Inserts `value` under `identifier`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if `value` is a database snapshot; databases
    /// cannot be nested inside fields.
    pub fn add(
        &mut self,
        identifier: impl Into<Identifier>,
        value: impl Into<Value>,
    ) -> CoreResult<()> {
        let value = value.into();
        if snapshot::is_snapshot(&value) {
            return Err(CoreError::InvalidValue { value });
        }
        self.insert(identifier.into(), value);
        Ok(())
    }

    /// Unchecked insert used when loading a snapshot.
    pub(crate) fn insert(&mut self, identifier: Identifier, value: Value) {
        self.entries.insert(identifier, value);
    }

    /// Removes and returns the value stored under `identifier`.
    ///
    /// # Errors
    ///
    /// Returns `IdentifierNotFound` if there is no such entry.
    pub fn remove(&mut self, identifier: impl Into<Identifier>) -> CoreResult<Value> {
        let identifier = identifier.into();
        self.entries
            .shift_remove(&identifier)
            .ok_or(CoreError::IdentifierNotFound { identifier })
    }

    /// Replaces the identity with a fresh random one. Entries are untouched.
    pub fn regenerate_identity(&mut self) {
        self.identity = random_identity();
    }

    /// Identifiers in insertion order.
    pub fn identifiers(&self) -> impl ExactSizeIterator<Item = &Identifier> {
        self.entries.keys()
    }

    /// Values in insertion order, aligned with [`Field::identifiers`].
    pub fn values(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.entries.values()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Identifier, &Value)> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the field holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
