//! Error types for respio
//!
//! Every reader and writer operation returns [`RespError`]. Use
//! [`RespError::kind`] to tell a closed connection apart from malformed data.

use std::io;

use thiserror::Error;

/// Result type alias using RespError
pub type Result<T> = std::result::Result<T, RespError>;

/// Unified error type for RESP encoding and decoding
#[derive(Debug, Error)]
pub enum RespError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    /// The underlying stream failed, including end-of-stream
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // -------------------------------------------------------------------------
    // Wire Errors
    // -------------------------------------------------------------------------
    /// A line or bulk body does not line up with the CRLF framing
    #[error("Framing error: {0}")]
    Framing(String),

    /// A length or integer field is not valid decimal, or text is not UTF-8
    #[error("Format error: {0}")]
    Format(String),

    // -------------------------------------------------------------------------
    // Type Errors
    // -------------------------------------------------------------------------
    /// Leading marker byte is not one of `+ - : $ *`
    #[error("Unknown type marker: 0x{0:02x}")]
    UnknownType(u8),

    /// A command parameter holds a value that cannot be sent as a bulk
    #[error("Unsupported parameter kind: {0}")]
    UnsupportedParam(&'static str),

    /// A decoded value has the wrong shape for the requested view
    #[error("Wrong type: {0}")]
    WrongType(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// Well-formed units that break a protocol rule or a configured limit
    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// Coarse classification of a [`RespError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Framing,
    Format,
    Type,
    Protocol,
}

impl RespError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RespError::Io(_) => ErrorKind::Io,
            RespError::Framing(_) => ErrorKind::Framing,
            RespError::Format(_) => ErrorKind::Format,
            RespError::UnknownType(_)
            | RespError::UnsupportedParam(_)
            | RespError::WrongType(_) => ErrorKind::Type,
            RespError::Protocol(_) => ErrorKind::Protocol,
        }
    }

    /// True when the peer closed the stream (clean or mid-unit)
    pub fn is_eof(&self) -> bool {
        matches!(self, RespError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }
}
