//! Snapshot format.
//!
//! A store is persisted as one snapshot file:
//!
//! ```text
//! offset 0 : magic b"DBLT"
//! offset 4 : u16 LE snapshot version
//! offset 6 : CBOR snapshot value
//! ```
//!
//! The snapshot value is an ordered map:
//!
//! ```text
//! { "$dblite": 1, "path": Text, "pin": Null | Integer,
//!   "fields": [ { "name": Text, "identity": Integer, "entries": Map } ... ] }
//! ```
//!
//! A map with the `"$dblite"` version marker and the snapshot's shape is a
//! database snapshot. Fields refuse to store one.

use crate::error::{CoreError, CoreResult};
use crate::field::Field;
use crate::identifier::Identifier;
use crate::pin::Pin;
use dblite_codec::{from_cbor, to_cbor, Value};
use std::path::{Path, PathBuf};

/// Magic bytes at the start of a snapshot file.
pub const SNAPSHOT_MAGIC: [u8; 4] = *b"DBLT";

/// Current snapshot version.
pub const SNAPSHOT_VERSION: u16 = 1;

/// Key marking a map value as a database snapshot.
pub const SNAPSHOT_MARKER: &str = "$dblite";

const HEADER_LEN: usize = SNAPSHOT_MAGIC.len() + 2;

/// A decoded database snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Path recorded when the snapshot was written.
    pub path: PathBuf,
    /// Stored pin.
    pub pin: Option<Pin>,
    /// Fields in their stored order.
    pub fields: Vec<Field>,
}

impl Snapshot {
    /// Rebuilds a snapshot from its value form.
    ///
    /// Unknown top-level keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if the value is not a snapshot or a part of it
    /// has the wrong shape.
    pub fn from_value(value: Value) -> CoreResult<Self> {
        let Value::Map(pairs) = value else {
            return Err(CoreError::invalid_format("snapshot must be a map"));
        };

        let mut marker = None;
        let mut path = None;
        let mut pin = None;
        let mut fields = None;
        for (key, value) in pairs {
            match key.as_text() {
                Some(SNAPSHOT_MARKER) => marker = Some(value),
                Some("path") => path = Some(value),
                Some("pin") => pin = Some(value),
                Some("fields") => fields = Some(value),
                _ => {}
            }
        }

        match marker {
            Some(Value::Integer(version))
                if (1..=i64::from(SNAPSHOT_VERSION)).contains(&version) => {}
            Some(Value::Integer(version)) => {
                return Err(CoreError::invalid_format(format!(
                    "unsupported snapshot version: {version}"
                )))
            }
            _ => return Err(CoreError::invalid_format("missing snapshot marker")),
        }

        let path = match path {
            Some(Value::Text(path)) => PathBuf::from(path),
            _ => return Err(CoreError::invalid_format("snapshot path must be text")),
        };

        let pin = match pin {
            Some(Value::Null) => None,
            Some(Value::Integer(n)) => Some(Pin::new(n)),
            _ => {
                return Err(CoreError::invalid_format(
                    "snapshot pin must be null or an integer",
                ))
            }
        };

        let fields = match fields {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(field_from_value)
                .collect::<CoreResult<Vec<_>>>()?,
            _ => return Err(CoreError::invalid_format("snapshot fields must be an array")),
        };

        Ok(Self { path, pin, fields })
    }

    /// Converts the snapshot back to its value form.
    #[must_use]
    pub fn to_value(&self) -> Value {
        to_value(&self.path, self.pin, &self.fields)
    }
}

/// Builds the value form of a store's state.
#[must_use]
pub fn to_value(path: &Path, pin: Option<Pin>, fields: &[Field]) -> Value {
    Value::map(vec![
        (
            Value::from(SNAPSHOT_MARKER),
            Value::Integer(i64::from(SNAPSHOT_VERSION)),
        ),
        (
            Value::from("path"),
            Value::Text(path.to_string_lossy().into_owned()),
        ),
        (
            Value::from("pin"),
            pin.map_or(Value::Null, |pin| Value::Integer(pin.value())),
        ),
        (
            Value::from("fields"),
            Value::Array(fields.iter().map(field_to_value).collect()),
        ),
    ])
}

/// Returns true if `value` has the shape of a database snapshot.
///
/// A map that merely uses `"$dblite"` as a key is ordinary data.
#[must_use]
pub fn is_snapshot(value: &Value) -> bool {
    matches!(
        value.get(SNAPSHOT_MARKER),
        Some(Value::Integer(version)) if (1..=i64::from(SNAPSHOT_VERSION)).contains(version)
    ) && matches!(value.get("path"), Some(Value::Text(_)))
        && matches!(value.get("pin"), Some(Value::Null | Value::Integer(_)))
        && matches!(value.get("fields"), Some(Value::Array(_)))
}

/// Encodes a snapshot value with the file header.
///
/// # Errors
///
/// Returns a codec error if the value contains a NaN float.
pub fn encode(value: &Value) -> CoreResult<Vec<u8>> {
    let body = to_cbor(value)?;
    let mut buf = Vec::with_capacity(HEADER_LEN + body.len());
    buf.extend_from_slice(&SNAPSHOT_MAGIC);
    buf.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
    buf.extend_from_slice(&body);
    Ok(buf)
}

/// Decodes snapshot file bytes.
///
/// # Errors
///
/// Returns `InvalidFormat` for a bad header or shape, or a codec error for
/// malformed CBOR.
pub fn decode(data: &[u8]) -> CoreResult<Snapshot> {
    if data.len() < HEADER_LEN || data[..4] != SNAPSHOT_MAGIC {
        return Err(CoreError::invalid_format("invalid snapshot magic"));
    }

    let version = u16::from_le_bytes([data[4], data[5]]);
    if version == 0 || version > SNAPSHOT_VERSION {
        return Err(CoreError::invalid_format(format!(
            "unsupported snapshot version: {version}"
        )));
    }

    let value = from_cbor(&data[HEADER_LEN..])?;
    Snapshot::from_value(value)
}

fn field_to_value(field: &Field) -> Value {
    let entries = field
        .iter()
        .map(|(id, value)| (Value::from(id.clone()), value.clone()))
        .collect();

    Value::map(vec![
        (Value::from("name"), Value::from(field.name())),
        // Identities are u64; the bit pattern round-trips through i64.
        (
            Value::from("identity"),
            Value::Integer(field.identity() as i64),
        ),
        (Value::from("entries"), Value::Map(entries)),
    ])
}

fn field_from_value(value: Value) -> CoreResult<Field> {
    let Value::Map(pairs) = value else {
        return Err(CoreError::invalid_format("field must be a map"));
    };

    let mut name = None;
    let mut identity = None;
    let mut entries = None;
    for (key, value) in pairs {
        match (key.as_text(), value) {
            (Some("name"), Value::Text(text)) => name = Some(text),
            (Some("identity"), Value::Integer(n)) => identity = Some(n as u64),
            (Some("entries"), Value::Map(map)) => entries = Some(map),
            (Some(key @ ("name" | "identity" | "entries")), other) => {
                return Err(CoreError::invalid_format(format!(
                    "field {key} has wrong type: {}",
                    other.kind()
                )))
            }
            _ => {}
        }
    }

    let (Some(name), Some(identity), Some(entries)) = (name, identity, entries) else {
        return Err(CoreError::invalid_format(
            "field needs name, identity and entries",
        ));
    };

    let mut field = Field::with_identity(name, identity);
    for (key, value) in entries {
        field.insert(Identifier::try_from(key)?, value);
    }
    Ok(field)
}
