//! Entry identifiers.

use crate::error::{CoreError, CoreResult};
use dblite_codec::Value;
use std::fmt;

/// Key of an entry inside a [`crate::Field`].
///
/// Integer and text identifiers are distinct key types: `1` and `"1"` never
/// address the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// Integer key.
    Integer(i64),
    /// Text key.
    Text(String),
}

impl Identifier {
    /// Returns the integer key, if this is one.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Returns the text key, if this is one.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Integer(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<i64> for Identifier {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for Identifier {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<u32> for Identifier {
    fn from(n: u32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<&Identifier> for Identifier {
    fn from(id: &Identifier) -> Self {
        id.clone()
    }
}

impl From<Identifier> for Value {
    fn from(id: Identifier) -> Self {
        match id {
            Identifier::Integer(n) => Value::Integer(n),
            Identifier::Text(s) => Value::Text(s),
        }
    }
}

impl TryFrom<Value> for Identifier {
    type Error = CoreError;

    fn try_from(value: Value) -> CoreResult<Self> {
        match value {
            Value::Integer(n) => Ok(Self::Integer(n)),
            Value::Text(s) => Ok(Self::Text(s)),
            other => Err(CoreError::invalid_format(format!(
                "entry identifier must be an integer or text, found {}",
                other.kind()
            ))),
        }
    }
}
