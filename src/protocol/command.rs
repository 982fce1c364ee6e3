//! Command definitions
//!
//! A command is a top-level array: a bulk name followed by parameters.

use bytes::Bytes;

use super::Value;

/// A decoded command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Command name, as sent (no case folding)
    pub name: String,

    /// Parameters after the name; empty when there are none
    pub params: Vec<Value>,
}

impl Command {
    pub fn new(name: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// Convert the decoded parameters back into writer parameters
    pub fn to_params(&self) -> Vec<Param> {
        self.params.iter().cloned().map(Param::from).collect()
    }
}

/// A command parameter for [`RespWriter::write_command`](super::RespWriter::write_command)
///
/// Every variant goes out as a bulk string. `Value` is the catch-all for
/// decoded values; only bulk, simple string and integer values can be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// Raw bytes, sent as-is
    Bytes(Bytes),

    /// UTF-8 text
    Str(String),

    /// Signed integer, sent as decimal text
    Int(i64),

    /// Unsigned integer, sent as decimal text
    UInt(u64),

    /// Any decoded value
    Value(Value),
}

impl From<&str> for Param {
    fn from(s: &str) -> Self {
        Param::Str(s.to_string())
    }
}

impl From<String> for Param {
    fn from(s: String) -> Self {
        Param::Str(s)
    }
}

impl From<&[u8]> for Param {
    fn from(b: &[u8]) -> Self {
        Param::Bytes(Bytes::copy_from_slice(b))
    }
}

impl<const N: usize> From<&[u8; N]> for Param {
    fn from(b: &[u8; N]) -> Self {
        Param::Bytes(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<u8>> for Param {
    fn from(b: Vec<u8>) -> Self {
        Param::Bytes(Bytes::from(b))
    }
}

impl From<Bytes> for Param {
    fn from(b: Bytes) -> Self {
        Param::Bytes(b)
    }
}

impl From<Value> for Param {
    fn from(value: Value) -> Self {
        match value {
            Value::Bulk(b) => Param::Bytes(b),
            Value::Simple(b) => Param::Bytes(b),
            Value::Integer(i) => Param::Int(i),
            other => Param::Value(other),
        }
    }
}

macro_rules! impl_signed_param {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Param {
                fn from(i: $t) -> Self {
                    Param::Int(i as i64)
                }
            }
        )*
    };
}

macro_rules! impl_unsigned_param {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Param {
                fn from(i: $t) -> Self {
                    Param::UInt(i as u64)
                }
            }
        )*
    };
}

impl_signed_param!(i8, i16, i32, i64, isize);
impl_unsigned_param!(u8, u16, u32, u64, usize);
