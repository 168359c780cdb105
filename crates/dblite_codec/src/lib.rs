//! # DBLite Codec
//!
//! Deterministic CBOR encoding of the DBLite value tree.
//!
//! A DBLite database is snapshotted as one [`Value`] and written with this
//! codec. The encoding is deterministic so that persisting the same state
//! twice produces the same bytes:
//!
//! - Integers and lengths use the shortest encoding
//! - Floats are always 64-bit doubles; NaN is rejected
//! - Maps keep insertion order; duplicate keys are rejected on decode
//! - Strings must be UTF-8
//! - No indefinite-length items, no tags
//!
//! ## Usage
//!
//! ```
//! use dblite_codec::{to_cbor, from_cbor, Value};
//!
//! let value = Value::map(vec![(Value::from("name"), Value::from("Alice"))]);
//! let bytes = to_cbor(&value).unwrap();
//!
//! let decoded = from_cbor(&bytes).unwrap();
//! assert_eq!(value, decoded);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod decoder;
mod encoder;
mod error;
mod value;

pub use decoder::{from_cbor, Decoder, MAX_DEPTH};
pub use encoder::{to_cbor, Encoder};
pub use error::{CodecError, CodecResult};
pub use value::Value;

/// Trait for types that can be encoded to CBOR.
pub trait Encode {
    /// Encode this value to CBOR bytes.
    fn encode(&self) -> CodecResult<Vec<u8>>;
}

/// Trait for types that can be decoded from CBOR.
pub trait Decode: Sized {
    /// Decode this value from CBOR bytes.
    fn decode(bytes: &[u8]) -> CodecResult<Self>;
}

impl Encode for Value {
    fn encode(&self) -> CodecResult<Vec<u8>> {
        to_cbor(self)
    }
}

impl Decode for Value {
    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        from_cbor(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn leaf_strategy() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::Integer),
            any::<f64>()
                .prop_filter("NaN is not encodable", |x| !x.is_nan())
                .prop_map(Value::Float),
            prop::collection::vec(any::<u8>(), 0..16).prop_map(Value::Bytes),
            "[a-zA-Z0-9 ]{0,12}".prop_map(Value::Text),
        ]
    }

    fn value_strategy() -> impl Strategy<Value = Value> {
        leaf_strategy().prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                // Keys are made unique by position so the map stays decodable
                prop::collection::vec(inner, 0..6).prop_map(|values| {
                    Value::Map(
                        values
                            .into_iter()
                            .enumerate()
                            .map(|(i, v)| (Value::Integer(i as i64), v))
                            .collect(),
                    )
                }),
            ]
        })
    }

    #[test]
    fn roundtrip_nested_document() {
        let value = Value::map(vec![
            (
                Value::Text("users".to_string()),
                Value::Array(vec![
                    Value::map(vec![
                        (Value::from("name"), Value::from("Alice")),
                        (Value::from("age"), Value::Integer(30)),
                        (Value::from("score"), Value::Float(98.5)),
                    ]),
                    Value::map(vec![
                        (Value::from("name"), Value::from("Bob")),
                        (Value::from("active"), Value::Bool(false)),
                    ]),
                ]),
            ),
            (Value::Integer(2), Value::Null),
        ]);
        let bytes = value.encode().unwrap();
        assert_eq!(Value::decode(&bytes).unwrap(), value);
    }

    proptest! {
        #[test]
        fn any_value_roundtrips(value in value_strategy()) {
            let bytes = to_cbor(&value).unwrap();
            prop_assert_eq!(from_cbor(&bytes).unwrap(), value);
        }

        #[test]
        fn encoding_is_stable(value in value_strategy()) {
            let first = to_cbor(&value).unwrap();
            let second = to_cbor(&from_cbor(&first).unwrap()).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
