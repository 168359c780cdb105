//! Benchmark utilities.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use dblite_core::{Field, Value};
use rand::Rng;

/// Generate random bytes of the specified size.
pub fn random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

/// Generate a user-like record.
pub fn record(index: i64) -> Value {
    Value::map(vec![
        (Value::from("name"), Value::Text(format!("user_{index}"))),
        (
            Value::from("email"),
            Value::Text(format!("user_{index}@example.com")),
        ),
        (Value::from("age"), Value::Integer(index % 100)),
        (Value::from("score"), Value::Float(index as f64 * 0.5)),
    ])
}

/// Generate a field holding `count` records keyed `0..count`.
pub fn populated_field(name: &str, count: usize) -> Field {
    let mut field = Field::new(name);
    for index in 0..count {
        let id = i64::try_from(index).unwrap_or(i64::MAX);
        field
            .add(id, record(id))
            .expect("records are never snapshots");
    }
    field
}

/// Generate `field_count` fields of `entries` records each.
pub fn populated_fields(field_count: usize, entries: usize) -> Vec<Field> {
    (0..field_count)
        .map(|i| populated_field(&format!("field_{i}"), entries))
        .collect()
}
