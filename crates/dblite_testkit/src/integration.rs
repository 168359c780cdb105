//! Cross-crate integration test helpers.
//!
//! Provides a harness that mirrors every write into an in-memory model so
//! tests can check a store, and every reload of it, against what was
//! written.

use dblite_core::{CoreError, Field, Identifier, Pin, Store, Value};
use dblite_storage::InMemoryBackend;
use std::collections::HashMap;

/// A test harness for integration testing.
pub struct StoreHarness {
    /// The store instance.
    pub store: Store,
    backend: InMemoryBackend,
    expected: HashMap<(String, Identifier), Value>,
}

impl StoreHarness {
    /// Creates a harness around an empty in-memory store.
    pub fn new(pin: Option<Pin>) -> Self {
        let (store, backend) = crate::fixtures::memory_store(pin);
        Self {
            store,
            backend,
            expected: HashMap::new(),
        }
    }

    /// Adds a field if no field with that name exists yet.
    pub fn ensure_field(&mut self, name: &str) {
        if self.store.get_field(name).is_err() {
            self.store.add_field(name);
        }
    }

    /// Adds an entry and tracks it.
    pub fn add(&mut self, field: &str, identifier: Identifier, value: Value) {
        self.ensure_field(field);
        self.store
            .add(field, value.clone(), &identifier)
            .expect("Failed to add entry");
        self.expected.insert((field.to_string(), identifier), value);
    }

    /// Removes an entry and updates tracking.
    pub fn remove(&mut self, field: &str, identifier: &Identifier) -> Result<Value, CoreError> {
        let removed = self.store.get_field_mut(field)?.remove(identifier)?;
        self.expected.remove(&(field.to_string(), identifier.clone()));
        Ok(removed)
    }

    /// Persists the store.
    pub fn persist(&mut self) {
        self.store.persist().expect("Failed to persist");
    }

    /// Connects a second handle to what was last persisted.
    pub fn reload(&self) -> Store {
        Store::connect_with_backend(
            crate::fixtures::MEMORY_PATH,
            self.store.pin(),
            self.backend.clone(),
        )
        .expect("Failed to reload")
    }

    /// Asserts that `store` holds exactly the tracked entries.
    pub fn verify(&self, store: &Store) {
        let mut seen = 0;
        for field in store.fields() {
            // Only the first field with a name is addressable.
            if store
                .get_field(field.name())
                .map_or(true, |first| !std::ptr::eq(first, field))
            {
                continue;
            }
            for (identifier, value) in field.iter() {
                let key = (field.name().to_string(), identifier.clone());
                assert_eq!(
                    self.expected.get(&key),
                    Some(value),
                    "entry mismatch for {}/{}",
                    field.name(),
                    identifier
                );
                seen += 1;
            }
        }
        assert_eq!(seen, self.expected.len(), "entry count mismatch");
    }

    /// Returns the number of tracked entries.
    pub fn tracked(&self) -> usize {
        self.expected.len()
    }
}

/// Returns the `(name, identifiers, values)` view of each field, which is
/// what must survive persistence and copying.
pub fn field_contents(fields: &[Field]) -> Vec<(String, Vec<Identifier>, Vec<Value>)> {
    fields
        .iter()
        .map(|field| {
            (
                field.name().to_string(),
                field.identifiers().cloned().collect(),
                field.values().cloned().collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{memory_store, TempStore, MEMORY_PATH};
    use crate::generators::{fields_strategy, identifier_strategy, pin_strategy, value_strategy};
    use proptest::prelude::*;

    fn alice() -> Value {
        Value::map(vec![(Value::from("name"), Value::from("Alice"))])
    }

    #[test]
    fn pinned_database_scenario() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("t.db");

        let mut store = Store::create(&path, Some(Pin::new(1234)), Vec::new()).unwrap();
        store.add_field("users");
        store.add("users", alice(), 1).unwrap();
        store.persist().unwrap();

        let reopened = Store::connect(&path, Some(Pin::new(1234))).unwrap();
        assert_eq!(reopened.get("users", 1).unwrap(), &alice());

        let wrong = Store::connect(&path, Some(Pin::new(9999)));
        assert!(matches!(
            wrong,
            Err(CoreError::PinMismatch { pin: Some(pin) }) if pin == Pin::new(9999)
        ));
    }

    #[test]
    fn duplicate_field_scenario() {
        let mut temp = TempStore::new();
        temp.add_field("users").add(1, "first").unwrap();
        temp.add_field("users").add(1, "second").unwrap();

        assert_eq!(temp.get_field("users").unwrap().get(1).unwrap(), &Value::from("first"));

        temp.remove_field("users").unwrap();
        assert_eq!(temp.field_names(), vec!["users"]);
        assert_eq!(temp.get("users", 1).unwrap(), &Value::from("second"));

        temp.persist().unwrap();
        assert_eq!(temp.reconnect().field_names(), vec!["users"]);
    }

    #[test]
    fn copy_is_independent_on_disk() {
        let mut temp = TempStore::new();
        temp.add_field("users").add(1, alice()).unwrap();

        let copy_path = temp.dir().join("copy.dbl");
        let mut copy = temp.copy(&copy_path, None).unwrap();
        copy.add("users", "changed", 1).unwrap();
        copy.add_field("extra");
        copy.persist().unwrap();

        let source = temp.reconnect();
        assert_eq!(source.get("users", 1).unwrap(), &alice());
        assert_eq!(source.field_names(), vec!["users"]);
    }

    #[test]
    fn harness_tracks_removals() {
        let mut harness = StoreHarness::new(Some(Pin::new(1)));
        harness.add("users", Identifier::from(1), alice());
        harness.add("users", Identifier::from("bob"), Value::from("Bob"));
        harness.add("orders", Identifier::from(10), Value::Integer(3));
        harness.remove("users", &Identifier::from(1)).unwrap();
        harness.persist();

        assert_eq!(harness.tracked(), 2);
        harness.verify(&harness.store);
        harness.verify(&harness.reload());

        assert!(matches!(
            harness.remove("users", &Identifier::from(1)),
            Err(CoreError::IdentifierNotFound { .. })
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn add_then_get_returns_value(
            identifier in identifier_strategy(),
            value in value_strategy(),
        ) {
            let mut field = Field::new("prop");
            field.add(&identifier, value.clone()).unwrap();
            prop_assert_eq!(field.get(&identifier).unwrap(), &value);
        }

        #[test]
        fn remove_then_get_fails(
            identifier in identifier_strategy(),
            value in value_strategy(),
        ) {
            let mut field = Field::new("prop");
            field.add(&identifier, value).unwrap();
            field.remove(&identifier).unwrap();
            let missing = matches!(
                field.get(&identifier),
                Err(CoreError::IdentifierNotFound { .. })
            );
            prop_assert!(missing);
        }

        #[test]
        fn create_then_connect_preserves_contents(
            pin in pin_strategy(),
            fields in fields_strategy(),
        ) {
            let backend = InMemoryBackend::new();
            let created =
                Store::create_with_backend(MEMORY_PATH, pin, fields.clone(), backend.clone()).unwrap();
            let connected = Store::connect_with_backend(MEMORY_PATH, pin, backend).unwrap();

            prop_assert_eq!(field_contents(connected.fields()), field_contents(&fields));
            prop_assert_eq!(connected.fields(), created.fields());
        }

        #[test]
        fn wrong_pin_is_rejected(stored in pin_strategy(), supplied in pin_strategy()) {
            prop_assume!(stored != supplied);
            let (_store, backend) = memory_store(stored);
            let result = Store::connect_with_backend(MEMORY_PATH, supplied, backend);
            let mismatch = matches!(result, Err(CoreError::PinMismatch { .. }));
            prop_assert!(mismatch);
        }

        #[test]
        fn copy_keeps_contents_and_isolates_source(fields in fields_strategy()) {
            let backend = InMemoryBackend::new();
            let mut source =
                Store::create_with_backend(MEMORY_PATH, None, fields, backend.clone()).unwrap();

            let mut copy = source
                .copy_with_backend("copy.dbl", None, InMemoryBackend::new())
                .unwrap();
            prop_assert_eq!(field_contents(copy.fields()), field_contents(source.fields()));

            copy.add_field("only_in_copy").add(0, true).unwrap();
            copy.persist().unwrap();

            let reloaded = Store::connect_with_backend(MEMORY_PATH, None, backend).unwrap();
            prop_assert_eq!(field_contents(reloaded.fields()), field_contents(source.fields()));
            prop_assert!(!source.field_names().contains(&"only_in_copy"));
        }

        #[test]
        fn persist_twice_is_byte_identical(pin in pin_strategy(), fields in fields_strategy()) {
            let (mut store, backend) = memory_store(pin);
            for field in fields {
                let target = store.add_field(field.name());
                for (identifier, value) in field.iter() {
                    target.add(identifier, value.clone()).unwrap();
                }
            }

            store.persist().unwrap();
            let first = backend.data().unwrap();
            store.persist().unwrap();
            prop_assert_eq!(backend.data().unwrap(), first);

            let a = Store::connect_with_backend(MEMORY_PATH, pin, backend.clone()).unwrap();
            let b = Store::connect_with_backend(MEMORY_PATH, pin, backend).unwrap();
            prop_assert_eq!(a.fields(), b.fields());
        }
    }
}
