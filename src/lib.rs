//! # respio
//!
//! Blocking reader and writer for the Redis Serialization Protocol (RESP):
//! - Recursive decoding of nested arrays into a typed [`Value`] tree
//! - Command view over decoded arrays (name + parameters)
//! - Buffered encoding with an explicit flush for composed units
//!
//! ## Architecture Overview
//!
//! ```text
//!        ┌──────────────────────────────────────┐
//!        │      Duplex stream (caller owned)    │
//!        └──────────┬────────────────▲──────────┘
//!                   │ Read           │ Write
//!                   ▼                │
//!          ┌────────────────┐ ┌────────────────┐
//!          │   RespReader   │ │   RespWriter   │
//!          │  (BufReader)   │ │  (BufWriter)   │
//!          └───────┬────────┘ └────────▲───────┘
//!                  │                   │
//!                  ▼                   │
//!          Value / Command      Value / Param
//! ```
//!
//! ## Example
//!
//! ```
//! use respio::{Param, RespReader, RespWriter};
//!
//! let mut writer = RespWriter::new(Vec::new());
//! writer.write_command("GET", &[Param::from("key")]).unwrap();
//! let wire = writer.into_inner().unwrap();
//! assert_eq!(wire, b"*2\r\n$3\r\nGET\r\n$3\r\nkey\r\n");
//!
//! let mut reader = RespReader::new(wire.as_slice());
//! let command = reader.read_command().unwrap();
//! assert_eq!(command.name, "GET");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ErrorKind, RespError, Result};
pub use config::Config;
pub use protocol::{Command, Param, RespReader, RespWriter, Value};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of respio
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
