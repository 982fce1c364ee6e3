//! RESP decoder
//!
//! Reads units from a buffered byte stream and materializes them as
//! [`Value`] trees.
//!
//! ## Dispatch
//! ```text
//! ┌────────┬──────────────────────────────────────────────┐
//! │ Marker │ Action                                       │
//! ├────────┼──────────────────────────────────────────────┤
//! │   +    │ rest of line -> Simple                       │
//! │   -    │ rest of line -> Error                        │
//! │   :    │ parse i64    -> Integer                      │
//! │   $    │ parse i32, read body + empty line -> Bulk    │
//! │   *    │ parse i64, decode n children -> Array        │
//! └────────┴──────────────────────────────────────────────┘
//! ```
//!
//! A length of `-1` on `$` or `*` decodes to [`Value::Null`].

use std::io::{self, BufRead, BufReader, Read};

use bytes::Bytes;

use crate::config::Config;
use crate::error::{RespError, Result};
use super::{Command, Value};
use super::{ARRAY, BULK, ERROR, INTEGER, MIN_LINE_LEN, NULL_LEN, SIMPLE_STRING};

/// Upper bound on slots reserved up front for an array.
/// Larger arrays still decode, they just grow as elements arrive.
const MAX_ARRAY_PREALLOC: usize = 1024;

/// Reads RESP units from a byte source
///
/// Each call blocks until the whole unit has been read. A failed call
/// leaves the stream at an unspecified position; the caller decides
/// whether to drop the connection.
pub struct RespReader<R> {
    /// Buffered source
    reader: BufReader<R>,

    /// Deepest array nesting allowed
    max_nesting_depth: usize,

    /// Largest bulk body allowed (bytes)
    max_bulk_len: usize,
}

impl<R: Read> RespReader<R> {
    /// Create a reader with the default config
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, &Config::default())
    }

    /// Create a reader with explicit limits and buffer size
    pub fn with_config(inner: R, config: &Config) -> Self {
        Self {
            reader: BufReader::with_capacity(config.read_buffer_size, inner),
            max_nesting_depth: config.max_nesting_depth,
            max_bulk_len: config.max_bulk_len,
        }
    }

    pub fn get_ref(&self) -> &R {
        self.reader.get_ref()
    }

    pub fn get_mut(&mut self) -> &mut R {
        self.reader.get_mut()
    }

    /// Unwrap the source. Any bytes still buffered are lost.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    // =========================================================================
    // Public API
    // =========================================================================

    /// Decode the next unit
    pub fn decode(&mut self) -> Result<Value> {
        self.decode_at(0)
    }

    /// Decode the next unit as a command
    ///
    /// The unit must be a non-empty array whose first element is a bulk
    /// holding the command name.
    pub fn read_command(&mut self) -> Result<Command> {
        let items = match self.decode()? {
            Value::Array(items) => items,
            other => {
                tracing::debug!("Rejected {} where a command was expected", other.kind_name());
                return Err(RespError::WrongType(format!(
                    "command must be an array, got {}",
                    other.kind_name()
                )));
            }
        };

        let mut items = items.into_iter();
        let name = match items.next() {
            Some(Value::Bulk(name)) => String::from_utf8(name.to_vec()).map_err(|e| {
                RespError::Format(format!("command name is not valid UTF-8: {}", e))
            })?,
            Some(other) => {
                return Err(RespError::WrongType(format!(
                    "command name must be a bulk string, got {}",
                    other.kind_name()
                )))
            }
            None => return Err(RespError::Protocol("empty command".to_string())),
        };

        let command = Command {
            name,
            params: items.collect(),
        };
        tracing::trace!(
            "Decoded command {} with {} params",
            command.name,
            command.params.len()
        );
        Ok(command)
    }

    // =========================================================================
    // Unit Decoding
    // =========================================================================

    fn decode_at(&mut self, depth: usize) -> Result<Value> {
        let line = self.read_line()?;
        let (marker, rest) = (line[0], &line[1..]);

        let value = match marker {
            ERROR => Value::Error(Bytes::copy_from_slice(rest)),
            SIMPLE_STRING => Value::Simple(Bytes::copy_from_slice(rest)),
            INTEGER => Value::Integer(parse_decimal(rest, "integer")?),
            BULK => self.decode_bulk(rest)?,
            ARRAY => self.decode_array(rest, depth + 1)?,
            _ => {
                tracing::debug!("Unknown type marker 0x{:02x}", marker);
                return Err(RespError::UnknownType(marker));
            }
        };

        tracing::trace!("Decoded {} at depth {}", value.kind_name(), depth);
        Ok(value)
    }

    fn decode_array(&mut self, len_field: &[u8], depth: usize) -> Result<Value> {
        let len: i64 = parse_decimal(len_field, "array length")?;
        if len == NULL_LEN {
            return Ok(Value::Null);
        }
        if len < 0 {
            return Err(RespError::Format(format!("negative array length: {}", len)));
        }
        if depth > self.max_nesting_depth {
            return Err(RespError::Protocol(format!(
                "array nesting exceeds {} levels",
                self.max_nesting_depth
            )));
        }

        let len = usize::try_from(len)
            .map_err(|_| RespError::Format(format!("array length out of range: {}", len)))?;

        let mut items = Vec::with_capacity(len.min(MAX_ARRAY_PREALLOC));
        for _ in 0..len {
            items.push(self.decode_at(depth)?);
        }
        Ok(Value::Array(items))
    }

    fn decode_bulk(&mut self, len_field: &[u8]) -> Result<Value> {
        let len: i32 = parse_decimal(len_field, "bulk length")?;
        if i64::from(len) == NULL_LEN {
            return Ok(Value::Null);
        }
        if len < 0 {
            return Err(RespError::Format(format!("negative bulk length: {}", len)));
        }

        let len = len as usize;
        if len > self.max_bulk_len {
            return Err(RespError::Protocol(format!(
                "bulk length {} exceeds limit of {} bytes",
                len, self.max_bulk_len
            )));
        }

        let mut body = vec![0u8; len];
        self.reader.read_exact(&mut body)?;

        // The body must be followed by a bare CRLF
        let trailer = self.read_raw_line()?;
        if !trailer.is_empty() {
            tracing::debug!(
                "Bulk declared {} bytes but {} more bytes precede CRLF",
                len,
                trailer.len()
            );
            return Err(RespError::Framing(
                "bulk body longer than declared length".to_string(),
            ));
        }

        Ok(Value::Bulk(Bytes::from(body)))
    }

    // =========================================================================
    // Line Reading
    // =========================================================================

    /// Read a unit's first line, without terminator
    fn read_line(&mut self) -> Result<Vec<u8>> {
        let line = self.read_raw_line()?;
        if line.len() < MIN_LINE_LEN {
            return Err(RespError::Framing(format!(
                "line too short: {} bytes (min {})",
                line.len(),
                MIN_LINE_LEN
            )));
        }
        Ok(line)
    }

    /// Read up to and including `\n`, then strip `\n` and an optional `\r`
    fn read_raw_line(&mut self) -> Result<Vec<u8>> {
        let mut line = Vec::new();
        let n = self.reader.read_until(b'\n', &mut line)?;

        if n == 0 || line.last() != Some(&b'\n') {
            return Err(RespError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stream ended before end of line",
            )));
        }

        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Ok(line)
    }
}

// =============================================================================
// Field Parsing
// =============================================================================

fn parse_decimal<T: std::str::FromStr>(bytes: &[u8], field: &str) -> Result<T> {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.parse::<T>().ok())
        .ok_or_else(|| {
            RespError::Format(format!(
                "invalid {}: {:?}",
                field,
                String::from_utf8_lossy(bytes)
            ))
        })
}
