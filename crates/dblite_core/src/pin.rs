//! Access pin.

use std::fmt;

/// A numeric access pin guarding [`crate::Store::connect`].
///
/// A pin is a shared secret compared for exact equality; it is stored in
/// the snapshot as-is and does not encrypt anything. Absence is modelled as
/// `Option<Pin>::None`, and `None` only matches `None`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pin(i64);

impl Pin {
    /// Creates a pin.
    #[inline]
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Renders an optional pin for messages: the number, or `none`.
    #[must_use]
    pub fn describe(pin: &Option<Self>) -> String {
        pin.map_or_else(|| "none".to_string(), |pin| pin.to_string())
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pin({})", self.0)
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Pin {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<i32> for Pin {
    fn from(value: i32) -> Self {
        Self(i64::from(value))
    }
}

impl From<Pin> for i64 {
    fn from(pin: Pin) -> Self {
        pin.0
    }
}
