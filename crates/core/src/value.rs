//! Scalar property values stored on nodes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar node property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// UTF-8 string
    String(String),
    /// Signed 64-bit integer
    Int(i64),
    /// Boolean
    Bool(bool),
}

impl Value {
    /// Name of the variant, used in type-mismatch errors.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
        }
    }

    /// Borrow as a string slice if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Copy out an integer if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Copy out a boolean if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_variant() {
        let s = Value::from("alice");
        assert_eq!(s.as_str(), Some("alice"));
        assert_eq!(s.as_int(), None);

        let i = Value::from(42i64);
        assert_eq!(i.as_int(), Some(42));
        assert_eq!(i.as_bool(), None);

        let b = Value::from(true);
        assert_eq!(b.as_bool(), Some(true));
        assert_eq!(b.as_str(), None);
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::from("x").type_name(), "string");
        assert_eq!(Value::from(1i64).type_name(), "int");
        assert_eq!(Value::from(false).type_name(), "bool");
    }

    #[test]
    fn display_quotes_strings_only() {
        assert_eq!(Value::from("hi").to_string(), "\"hi\"");
        assert_eq!(Value::from(-3i64).to_string(), "-3");
        assert_eq!(Value::from(true).to_string(), "true");
    }
}
