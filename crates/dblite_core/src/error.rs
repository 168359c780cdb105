//! Error types for DBLite core.

use crate::identifier::Identifier;
use crate::pin::Pin;
use dblite_codec::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in DBLite core operations.
///
/// Every variant carries the context a presentation layer needs to render a
/// precise message: the identifier, field name, database path, pin or
/// offending value.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No entry with this identifier exists in the field.
    #[error("identifier {identifier} not found in this field")]
    IdentifierNotFound {
        /// The identifier that was looked up.
        identifier: Identifier,
    },

    /// No field with this name exists in the database.
    #[error("field '{name}' not found in database {}", .path.display())]
    FieldNotFound {
        /// The field name that was looked up.
        name: String,
        /// Path of the database that was searched.
        path: PathBuf,
    },

    /// The database file could not be opened.
    #[error("database {} not found", .path.display())]
    DatabaseNotFound {
        /// Path that was opened.
        path: PathBuf,
    },

    /// The supplied pin does not match the stored pin.
    #[error("pin ({}) does not match the database", Pin::describe(.pin))]
    PinMismatch {
        /// The pin that was supplied.
        pin: Option<Pin>,
    },

    /// A database snapshot was offered as a field entry.
    #[error("invalid value: a database cannot be stored as a field entry ({})", .value.kind())]
    InvalidValue {
        /// The rejected value.
        value: Value,
    },

    /// Storage backend error.
    #[error("storage error: {0}")]
    Storage(#[from] dblite_storage::StorageError),

    /// CBOR codec error.
    #[error("codec error: {0}")]
    Codec(#[from] dblite_codec::CodecError),

    /// Invalid database format or version.
    #[error("invalid database format: {message}")]
    InvalidFormat {
        /// Description of the format issue.
        message: String,
    },
}

impl CoreError {
    /// Creates an identifier not found error.
    pub fn identifier_not_found(identifier: impl Into<Identifier>) -> Self {
        Self::IdentifierNotFound {
            identifier: identifier.into(),
        }
    }

    /// Creates a field not found error.
    pub fn field_not_found(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::FieldNotFound {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }
}
