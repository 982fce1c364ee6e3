//! RESP encoder
//!
//! Serializes values and commands into a buffered byte sink.
//!
//! ## Flush Policy
//! - Reply helpers (`write_nil`, `write_error`, `write_simple_string`)
//!   flush immediately.
//! - Everything else only buffers. Call [`RespWriter::flush`] once the
//!   top-level unit is complete.

use std::io::{BufWriter, Write};

use crate::config::Config;
use crate::error::{RespError, Result};
use super::{Param, Value};
use super::{ARRAY, BULK, CRLF, ERROR, INTEGER, NIL, SIMPLE_STRING};

/// Writes RESP units to a byte sink
pub struct RespWriter<W: Write> {
    /// Buffered sink
    writer: BufWriter<W>,
}

impl<W: Write> RespWriter<W> {
    /// Create a writer with the default buffer size
    pub fn new(inner: W) -> Self {
        Self::with_config(inner, &Config::default())
    }

    pub fn with_config(inner: W, config: &Config) -> Self {
        Self {
            writer: BufWriter::with_capacity(config.write_buffer_size, inner),
        }
    }

    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }

    /// Flush and unwrap the sink
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| RespError::Io(e.into_error()))
    }

    /// Push buffered bytes to the sink
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    // =========================================================================
    // Compositional Writes (buffered)
    // =========================================================================

    /// Write `*<n>\r\n`
    pub fn write_array_header(&mut self, n: i64) -> Result<()> {
        self.write_header(ARRAY, n)
    }

    /// Write `text` as a bulk string
    pub fn write_bulk_string(&mut self, text: &str) -> Result<()> {
        self.write_bulk_bytes(text.as_bytes())
    }

    /// Write `$<len>\r\n<payload>\r\n`
    pub fn write_bulk_bytes(&mut self, payload: &[u8]) -> Result<()> {
        self.write_header(BULK, payload.len() as i64)?;
        self.writer.write_all(payload)?;
        self.writer.write_all(CRLF)?;
        Ok(())
    }

    /// Write `:<i>\r\n`
    pub fn write_integer(&mut self, i: i64) -> Result<()> {
        self.write_header(INTEGER, i)
    }

    /// Write the decimal text of `i` as a bulk string
    pub fn write_bulk_integer(&mut self, i: i64) -> Result<()> {
        self.write_bulk_bytes(i.to_string().as_bytes())
    }

    /// Write a command as an array of bulk strings
    ///
    /// An empty `params` slice produces a one-element array holding only
    /// the name. If a parameter cannot be encoded the call stops there;
    /// the bytes written so far stay in the buffer.
    pub fn write_command(&mut self, name: &str, params: &[Param]) -> Result<()> {
        tracing::trace!("Encoding command {} with {} params", name, params.len());

        self.write_array_header(params.len() as i64 + 1)?;
        self.write_bulk_string(name)?;
        for param in params {
            self.write_param(param)?;
        }
        Ok(())
    }

    /// Write any value, recursing into arrays
    ///
    /// [`Value::Null`] is written as a null bulk.
    pub fn write_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.writer.write_all(NIL)?,
            Value::Simple(text) => self.write_line(SIMPLE_STRING, text)?,
            Value::Error(text) => self.write_line(ERROR, text)?,
            Value::Integer(i) => self.write_integer(*i)?,
            Value::Bulk(payload) => self.write_bulk_bytes(payload)?,
            Value::Array(items) => {
                self.write_array_header(items.len() as i64)?;
                for item in items {
                    self.write_value(item)?;
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Replies (flushed)
    // =========================================================================

    /// Write `$-1\r\n` and flush
    pub fn write_nil(&mut self) -> Result<()> {
        self.writer.write_all(NIL)?;
        self.flush()
    }

    /// Write `-<text>\r\n` and flush
    pub fn write_error(&mut self, text: &str) -> Result<()> {
        self.write_line(ERROR, text.as_bytes())?;
        self.flush()
    }

    /// Write `+<text>\r\n` and flush
    pub fn write_simple_string(&mut self, text: &str) -> Result<()> {
        self.write_line(SIMPLE_STRING, text.as_bytes())?;
        self.flush()
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn write_param(&mut self, param: &Param) -> Result<()> {
        match param {
            Param::Bytes(b) => self.write_bulk_bytes(b),
            Param::Str(s) => self.write_bulk_string(s),
            Param::Int(i) => self.write_bulk_integer(*i),
            Param::UInt(u) => self.write_bulk_bytes(u.to_string().as_bytes()),
            Param::Value(Value::Bulk(b)) => self.write_bulk_bytes(b),
            Param::Value(Value::Simple(b)) => self.write_bulk_bytes(b),
            Param::Value(Value::Integer(i)) => self.write_bulk_integer(*i),
            Param::Value(other) => {
                tracing::debug!("Refusing to send {} as a command parameter", other.kind_name());
                Err(RespError::UnsupportedParam(other.kind_name()))
            }
        }
    }

    /// Write `<marker><n>\r\n`
    fn write_header(&mut self, marker: u8, n: i64) -> Result<()> {
        write!(self.writer, "{}{}\r\n", marker as char, n)?;
        Ok(())
    }

    /// Write `<marker><text>\r\n`, rejecting text that would break framing
    fn write_line(&mut self, marker: u8, text: &[u8]) -> Result<()> {
        if text.iter().any(|&b| b == b'\r' || b == b'\n') {
            return Err(RespError::Framing(format!(
                "line text may not contain CR or LF: {:?}",
                String::from_utf8_lossy(text)
            )));
        }
        self.writer.write_all(&[marker])?;
        self.writer.write_all(text)?;
        self.writer.write_all(CRLF)?;
        Ok(())
    }
}
