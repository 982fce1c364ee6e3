//! Encoder Tests
//!
//! These tests verify:
//! - Exact wire bytes for every write operation
//! - Command assembly and parameter dispatch
//! - Flush policy (reply helpers flush, compositional writes buffer)
//! - Sink failure propagation

use std::io::{self, Write};

use bytes::Bytes;
use respio::{Config, ErrorKind, Param, RespError, RespWriter, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn encode_with<F>(f: F) -> Vec<u8>
where
    F: FnOnce(&mut RespWriter<Vec<u8>>) -> respio::Result<()>,
{
    let mut writer = RespWriter::new(Vec::new());
    f(&mut writer).unwrap();
    writer.into_inner().unwrap()
}

/// Sink that rejects every write
struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer went away"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// Compositional Write Tests
// =============================================================================

#[test]
fn test_write_array_header() {
    assert_eq!(encode_with(|w| w.write_array_header(3)), b"*3\r\n");
    assert_eq!(encode_with(|w| w.write_array_header(0)), b"*0\r\n");
    assert_eq!(encode_with(|w| w.write_array_header(-1)), b"*-1\r\n");
}

#[test]
fn test_write_bulk_string() {
    assert_eq!(encode_with(|w| w.write_bulk_string("hello")), b"$5\r\nhello\r\n");
    assert_eq!(encode_with(|w| w.write_bulk_string("")), b"$0\r\n\r\n");
}

#[test]
fn test_write_bulk_string_length_is_in_bytes() {
    // "héllo" is 6 bytes in UTF-8
    assert_eq!(
        encode_with(|w| w.write_bulk_string("héllo")),
        "$6\r\nhéllo\r\n".as_bytes()
    );
}

#[test]
fn test_write_bulk_bytes_binary() {
    let payload = [0x00, b'\r', b'\n', 0xff];
    assert_eq!(
        encode_with(|w| w.write_bulk_bytes(&payload)),
        b"$4\r\n\x00\r\n\xff\r\n"
    );
}

#[test]
fn test_write_integer() {
    assert_eq!(encode_with(|w| w.write_integer(42)), b":42\r\n");
    assert_eq!(encode_with(|w| w.write_integer(-7)), b":-7\r\n");
    assert_eq!(
        encode_with(|w| w.write_integer(i64::MIN)),
        b":-9223372036854775808\r\n"
    );
}

#[test]
fn test_write_bulk_integer() {
    assert_eq!(encode_with(|w| w.write_bulk_integer(1234)), b"$4\r\n1234\r\n");
    assert_eq!(encode_with(|w| w.write_bulk_integer(-5)), b"$2\r\n-5\r\n");
}

// =============================================================================
// Command Tests
// =============================================================================

#[test]
fn test_write_command_get() {
    let wire = encode_with(|w| w.write_command("GET", &[Param::from("key")]));
    assert_eq!(wire, b"*2\r\n$3\r\nGET\r\n$3\r\nkey\r\n");
}

#[test]
fn test_write_command_without_params() {
    let wire = encode_with(|w| w.write_command("PING", &[]));
    assert_eq!(wire, b"*1\r\n$4\r\nPING\r\n");
}

#[test]
fn test_write_command_param_kinds() {
    let params = vec![
        Param::from(b"raw".as_slice()),
        Param::from("text".to_string()),
        Param::from(-12i32),
        Param::from(300u16),
        Param::from(u64::MAX),
        Param::from(Bytes::from_static(b"b")),
    ];
    let wire = encode_with(|w| w.write_command("MIX", &params));

    let expected: &[u8] = b"*7\r\n\
        $3\r\nMIX\r\n\
        $3\r\nraw\r\n\
        $4\r\ntext\r\n\
        $3\r\n-12\r\n\
        $3\r\n300\r\n\
        $20\r\n18446744073709551615\r\n\
        $1\r\nb\r\n";
    assert_eq!(wire, expected);
}

#[test]
fn test_write_command_bulk_shaped_values() {
    let params = vec![
        Param::Value(Value::Bulk(Bytes::from_static(b"v"))),
        Param::Value(Value::simple("OK")),
        Param::Value(Value::Integer(9)),
    ];
    let wire = encode_with(|w| w.write_command("ECHO", &params));
    assert_eq!(
        wire,
        b"*4\r\n$4\r\nECHO\r\n$1\r\nv\r\n$2\r\nOK\r\n$1\r\n9\r\n"
    );
}

#[test]
fn test_write_command_unsupported_param_stops_writing() {
    let params = vec![
        Param::from("a"),
        Param::Value(Value::Array(vec![])),
        Param::from("never"),
    ];

    let mut writer = RespWriter::new(Vec::new());
    let err = writer.write_command("SET", &params).unwrap_err();
    assert!(matches!(err, RespError::UnsupportedParam("array")));
    assert_eq!(err.kind(), ErrorKind::Type);

    // What was written before the failure stays buffered
    let wire = writer.into_inner().unwrap();
    assert_eq!(wire, b"*4\r\n$3\r\nSET\r\n$1\r\na\r\n");
}

#[test]
fn test_write_command_null_param_unsupported() {
    let mut writer = RespWriter::new(Vec::new());
    let err = writer
        .write_command("SET", &[Param::Value(Value::Null)])
        .unwrap_err();
    assert!(matches!(err, RespError::UnsupportedParam("null")));
}

#[test]
fn test_param_from_value_maps_to_direct_variants() {
    assert_eq!(
        Param::from(Value::Bulk(Bytes::from_static(b"x"))),
        Param::Bytes(Bytes::from_static(b"x"))
    );
    assert_eq!(Param::from(Value::Integer(1)), Param::Int(1));
    assert_eq!(
        Param::from(Value::simple("s")),
        Param::Bytes(Bytes::from_static(b"s"))
    );
    assert_eq!(Param::from(Value::Null), Param::Value(Value::Null));
}

// =============================================================================
// Value Tests
// =============================================================================

#[test]
fn test_write_value_nested() {
    let value = Value::Array(vec![
        Value::Array(vec![Value::Integer(1)]),
        Value::Bulk(Bytes::from_static(b"foo")),
        Value::Null,
    ]);
    let wire = encode_with(|w| w.write_value(&value));
    assert_eq!(wire, b"*3\r\n*1\r\n:1\r\n$3\r\nfoo\r\n$-1\r\n");
}

#[test]
fn test_write_value_scalars() {
    assert_eq!(
        encode_with(|w| w.write_value(&Value::simple("OK"))),
        b"+OK\r\n"
    );
    assert_eq!(
        encode_with(|w| w.write_value(&Value::error("ERR no"))),
        b"-ERR no\r\n"
    );
}

// =============================================================================
// Reply Tests
// =============================================================================

#[test]
fn test_write_nil() {
    assert_eq!(encode_with(|w| w.write_nil()), b"$-1\r\n");
}

#[test]
fn test_write_error() {
    assert_eq!(
        encode_with(|w| w.write_error("ERR wrong type")),
        b"-ERR wrong type\r\n"
    );
}

#[test]
fn test_write_simple_string() {
    assert_eq!(encode_with(|w| w.write_simple_string("PONG")), b"+PONG\r\n");
}

#[test]
fn test_reply_text_with_newline_rejected() {
    let mut writer = RespWriter::new(Vec::new());

    let err = writer.write_simple_string("a\r\nb").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Framing);
    let err = writer.write_error("line\nbreak").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Framing);

    // Nothing was written
    assert!(writer.into_inner().unwrap().is_empty());
}

// =============================================================================
// Flush Policy Tests
// =============================================================================

#[test]
fn test_reply_helpers_flush_immediately() {
    let mut writer = RespWriter::new(Vec::new());

    writer.write_simple_string("OK").unwrap();
    assert_eq!(writer.get_ref().as_slice(), b"+OK\r\n");

    writer.write_nil().unwrap();
    assert_eq!(writer.get_ref().as_slice(), b"+OK\r\n$-1\r\n");

    writer.write_error("ERR").unwrap();
    assert_eq!(writer.get_ref().as_slice(), b"+OK\r\n$-1\r\n-ERR\r\n");
}

#[test]
fn test_compositional_writes_buffer_until_flush() {
    let mut writer = RespWriter::new(Vec::new());

    writer.write_command("GET", &[Param::from("k")]).unwrap();
    writer.write_integer(1).unwrap();
    assert!(writer.get_ref().is_empty());

    writer.flush().unwrap();
    assert_eq!(
        writer.get_ref().as_slice(),
        b"*2\r\n$3\r\nGET\r\n$1\r\nk\r\n:1\r\n"
    );
}

#[test]
fn test_small_buffer_spills_without_flush() {
    let config = Config::builder().write_buffer_size(4).build();
    let mut writer = RespWriter::with_config(Vec::new(), &config);

    writer.write_bulk_string("larger than four").unwrap();
    assert!(!writer.get_ref().is_empty());
}

// =============================================================================
// Sink Failure Tests
// =============================================================================

#[test]
fn test_flush_propagates_sink_error() {
    let mut writer = RespWriter::new(BrokenSink);

    // Buffered, so no error yet
    writer.write_integer(1).unwrap();

    let err = writer.flush().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    match err {
        RespError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("Expected IO error, got {:?}", other),
    }
}

#[test]
fn test_reply_helper_propagates_sink_error() {
    let mut writer = RespWriter::new(BrokenSink);
    assert_eq!(writer.write_nil().unwrap_err().kind(), ErrorKind::Io);
}
