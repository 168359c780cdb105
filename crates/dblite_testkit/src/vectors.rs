//! Snapshot format test vectors.
//!
//! Each vector pairs a store state with the exact snapshot bytes it must
//! encode to. They pin down the file format so that a change to it shows
//! up as a failing test rather than as unreadable databases.

use dblite_core::{snapshot, Field, Pin, Value};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A snapshot test vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Expected snapshot bytes (hex-encoded).
    pub expected_hex: String,
}

impl TestVector {
    fn new(id: &str, description: &str, expected_hex: &str) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            expected_hex: expected_hex.into(),
        }
    }

    /// Returns the expected bytes.
    pub fn expected_bytes(&self) -> Vec<u8> {
        hex_decode(&self.expected_hex).expect("Invalid hex in test vector")
    }
}

/// A store state to encode.
pub struct VectorInput {
    /// Recorded path.
    pub path: &'static str,
    /// Stored pin.
    pub pin: Option<Pin>,
    /// Fields in order.
    pub fields: Vec<Field>,
}

impl VectorInput {
    /// Encodes the state as snapshot file bytes.
    pub fn encode(&self) -> Vec<u8> {
        let value = snapshot::to_value(Path::new(self.path), self.pin, &self.fields);
        snapshot::encode(&value).expect("Failed to encode vector input")
    }
}

/// Snapshot vectors paired with the state that produces them.
pub fn snapshot_vectors() -> Vec<(TestVector, VectorInput)> {
    let mut users = Field::with_identity("users", 42);
    users
        .add(1, Value::map(vec![("name".into(), "Alice".into())]))
        .expect("Failed to add entry");

    let mut mixed = Field::with_identity("mixed", 7);
    mixed.add(1, "int").expect("Failed to add entry");
    mixed.add("1", "text").expect("Failed to add entry");
    mixed
        .add(
            -1,
            Value::Array(vec![Value::Bool(true), Value::Null, Value::Float(1.5)]),
        )
        .expect("Failed to add entry");

    vec![
        (
            TestVector::new(
                "snapshot_empty",
                "Empty store without a pin",
                "44424c540100a4672464626c69746501647061746864742e64626370696ef6666669656c647380",
            ),
            VectorInput {
                path: "t.db",
                pin: None,
                fields: Vec::new(),
            },
        ),
        (
            TestVector::new(
                "snapshot_pinned_users",
                "Pinned store with one map entry",
                "44424c540100a4672464626c69746501647061746864742e64626370696e1904d2666669656c64\
                 7381a3646e616d65657573657273686964656e74697479182a67656e7472696573a101a1646e61\
                 6d6565416c696365",
            ),
            VectorInput {
                path: "t.db",
                pin: Some(Pin::new(1234)),
                fields: vec![users],
            },
        ),
        (
            TestVector::new(
                "snapshot_mixed_identifiers",
                "Negative pin, integer and text identifiers, float entry",
                "44424c540100a4672464626c697465016470617468656d2e64626c6370696e24666669656c6473\
                 81a3646e616d65656d69786564686964656e746974790767656e7472696573a30163696e746131\
                 64746578742083f5f6fb3ff8000000000000",
            ),
            VectorInput {
                path: "m.dbl",
                pin: Some(Pin::new(-5)),
                fields: vec![mixed],
            },
        ),
    ]
}

/// Exports the vectors as JSON.
pub fn vectors_json() -> String {
    let vectors: Vec<TestVector> = snapshot_vectors().into_iter().map(|(v, _)| v).collect();
    serde_json::to_string_pretty(&vectors).expect("Failed to serialize vectors")
}

/// Encodes bytes as lowercase hex.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decodes a hex string. Returns `None` on odd length or bad digits.
pub fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok())
        .collect()
}
