//! Protocol Module
//!
//! Reader and writer for the Redis Serialization Protocol (RESP).
//!
//! ## Wire Format
//!
//! Every unit starts with a one-byte type marker and ends its first line
//! with CRLF:
//!
//! ```text
//! simple   = "+" text CRLF
//! error    = "-" text CRLF
//! integer  = ":" int64 CRLF
//! bulk     = "$" int32 CRLF [ payload CRLF ]      ; -1 => null, no payload
//! array    = "*" int64 CRLF *unit                  ; -1 => null, no elements
//! command  = array                                  ; [name (bulk), params...]
//! ```
//!
//! ### Example
//! ```text
//! *2\r\n$3\r\nGET\r\n$3\r\nkey\r\n     GET key
//! $-1\r\n                            null bulk
//! ```

mod command;
mod value;
mod decoder;
mod encoder;

pub use command::{Command, Param};
pub use value::Value;
pub use decoder::RespReader;
pub use encoder::RespWriter;

// =============================================================================
// Grammar Constants
// =============================================================================

/// Simple string marker
pub const SIMPLE_STRING: u8 = b'+';

/// Error marker
pub const ERROR: u8 = b'-';

/// Integer marker
pub const INTEGER: u8 = b':';

/// Bulk string marker
pub const BULK: u8 = b'$';

/// Array marker
pub const ARRAY: u8 = b'*';

/// Line terminator
pub const CRLF: &[u8; 2] = b"\r\n";

/// Length value denoting a null bulk or null array
pub const NULL_LEN: i64 = -1;

/// Encoded null bulk
pub const NIL: &[u8; 5] = b"$-1\r\n";

/// Shortest valid line: marker plus one byte of payload
pub const MIN_LINE_LEN: usize = 2;
