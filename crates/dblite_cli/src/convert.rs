//! Conversions between command-line input, JSON and DBLite values.

use dblite_core::{Identifier, Value};
use serde_json::{Map, Number};

/// Parses an entry identifier.
///
/// Anything that parses as an `i64` is an integer identifier unless
/// `force_text` is set.
pub fn parse_identifier(raw: &str, force_text: bool) -> Identifier {
    if force_text {
        return Identifier::from(raw);
    }
    raw.parse::<i64>()
        .map_or_else(|_| Identifier::from(raw), Identifier::Integer)
}

/// Converts parsed JSON into a value.
///
/// Integers outside the `i64` range become floats.
pub fn from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::INFINITY)),
        },
        serde_json::Value::String(s) => Value::Text(s),
        serde_json::Value::Array(items) => Value::Array(items.into_iter().map(from_json).collect()),
        serde_json::Value::Object(object) => Value::map(
            object
                .into_iter()
                .map(|(key, value)| (Value::Text(key), from_json(value)))
                .collect(),
        ),
    }
}

/// Converts a value to JSON for display.
///
/// Bytes become arrays of numbers and non-finite floats become `null`.
/// A map whose keys are all text becomes an object. Any other map becomes
/// an array of `[key, value]` pairs so that keys such as `1` and `"1"` stay
/// distinct.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Integer(n) => serde_json::Value::Number(Number::from(*n)),
        Value::Float(x) => Number::from_f64(*x).map_or(serde_json::Value::Null, serde_json::Value::Number),
        Value::Bytes(bytes) => {
            serde_json::Value::Array(bytes.iter().map(|b| serde_json::Value::from(*b)).collect())
        }
        Value::Text(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Value::Map(pairs) if pairs.iter().all(|(key, _)| key.as_text().is_some()) => {
            let mut object = Map::with_capacity(pairs.len());
            for (key, value) in pairs {
                object.insert(key.as_text().unwrap_or_default().to_string(), to_json(value));
            }
            serde_json::Value::Object(object)
        }
        Value::Map(pairs) => serde_json::Value::Array(
            pairs
                .iter()
                .map(|(key, value)| serde_json::Value::Array(vec![to_json(key), to_json(value)]))
                .collect(),
        ),
    }
}
