//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random test data
//! that maintains required invariants.

use dblite_core::{Field, Identifier, Pin, Value};
use proptest::prelude::*;

/// Strategy for generating encodable leaf values (no NaN floats).
pub fn leaf_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        any::<f64>()
            .prop_filter("NaN is not encodable", |x| !x.is_nan())
            .prop_map(Value::Float),
        prop::collection::vec(any::<u8>(), 0..32).prop_map(Value::Bytes),
        "[a-zA-Z0-9 _-]{0,24}".prop_map(Value::Text),
    ]
}

/// Strategy for generating nested values.
///
/// Map keys are distinct text keys so that generated values survive a
/// round trip through the decoder, which rejects duplicate keys.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_value_strategy().prop_recursive(3, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..6).prop_map(|map| {
                Value::map(
                    map.into_iter()
                        .map(|(key, value)| (Value::Text(key), value))
                        .collect(),
                )
            }),
        ]
    })
}

/// Strategy for generating entry identifiers of both kinds.
pub fn identifier_strategy() -> impl Strategy<Value = Identifier> {
    prop_oneof![
        any::<i64>().prop_map(Identifier::Integer),
        "[a-zA-Z0-9_]{0,16}".prop_map(Identifier::Text),
    ]
}

/// Strategy for generating valid field names.
pub fn field_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z][a-zA-Z0-9_]{0,31}").expect("Invalid regex")
}

/// Strategy for generating optional pins.
pub fn pin_strategy() -> impl Strategy<Value = Option<Pin>> {
    prop::option::of(any::<i64>().prop_map(Pin::new))
}

/// Strategy for generating a field populated with entries.
pub fn field_strategy() -> impl Strategy<Value = Field> {
    (
        field_name_strategy(),
        prop::collection::vec((identifier_strategy(), value_strategy()), 0..8),
    )
        .prop_map(|(name, entries)| {
            let mut field = Field::new(name);
            for (identifier, value) in entries {
                field
                    .add(identifier, value)
                    .expect("generated values are never snapshots");
            }
            field
        })
}

/// Strategy for generating an ordered list of fields, duplicates allowed.
pub fn fields_strategy() -> impl Strategy<Value = Vec<Field>> {
    prop::collection::vec(field_strategy(), 0..5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dblite_codec::{from_cbor, to_cbor};

    proptest! {
        #[test]
        fn generated_values_roundtrip(value in value_strategy()) {
            let bytes = to_cbor(&value).unwrap();
            prop_assert_eq!(from_cbor(&bytes).unwrap(), value);
        }

        #[test]
        fn field_names_are_valid(name in field_name_strategy()) {
            prop_assert!(!name.is_empty());
            prop_assert!(name.len() <= 32);
        }

        #[test]
        fn fields_never_exceed_generated_entries(field in field_strategy()) {
            prop_assert!(field.size() < 8);
        }
    }
}
