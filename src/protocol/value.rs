//! Value definitions
//!
//! The in-memory form of a decoded RESP unit.

use bytes::Bytes;

/// A decoded RESP unit
///
/// Null bulks (`$-1`) and null arrays (`*-1`) both decode to [`Value::Null`].
/// Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Null bulk or null array
    Null,

    /// `+` line, verbatim bytes
    Simple(Bytes),

    /// `-` line, verbatim bytes
    Error(Bytes),

    /// `:` line
    Integer(i64),

    /// `$` length-prefixed binary string
    Bulk(Bytes),

    /// `*` sequence of units, possibly nested
    Array(Vec<Value>),
}

impl Value {
    /// Simple string from text
    pub fn simple(text: &str) -> Self {
        Value::Simple(Bytes::copy_from_slice(text.as_bytes()))
    }

    /// Error value from text
    pub fn error(text: &str) -> Self {
        Value::Error(Bytes::copy_from_slice(text.as_bytes()))
    }

    /// Name of this value's kind, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Simple(_) => "simple string",
            Value::Error(_) => "error",
            Value::Integer(_) => "integer",
            Value::Bulk(_) => "bulk",
            Value::Array(_) => "array",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Payload of a bulk value
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bulk(b) => Some(&b[..]),
            _ => None,
        }
    }

    /// Text of a simple string, error or bulk, if it is valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Simple(b) | Value::Error(b) | Value::Bulk(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bulk(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bulk(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bulk(Bytes::from(b))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}
