//! Codec Tests
//!
//! Tests for command and response encoding/decoding.

use std::io::Cursor;

use groupledger::protocol::{
    Command, Response, Status,
    encode_command, decode_command,
    encode_response, decode_response,
    read_command, write_command,
    read_response, write_response,
    HEADER_SIZE,
};
use groupledger::LedgerError;

// =============================================================================
// Command Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_decode_invoke() {
    let cmd = Command::invoke("create", &["42", "Alpha", "Desc"]);
    let decoded = decode_command(&encode_command(&cmd)).unwrap();

    match decoded {
        Command::Invoke { function, args } => {
            assert_eq!(function, "create");
            assert_eq!(args, vec!["42", "Alpha", "Desc"]);
        }
        _ => panic!("Expected INVOKE command"),
    }
}

#[test]
fn test_encode_decode_invoke_without_args() {
    let cmd = Command::invoke("listAll", &[] as &[&str]);
    let decoded = decode_command(&encode_command(&cmd)).unwrap();

    assert_eq!(decoded, cmd);
}

#[test]
fn test_encode_decode_empty_and_unicode_args() {
    let cmd = Command::invoke("create", &["", "Grüße", "説明"]);
    let decoded = decode_command(&encode_command(&cmd)).unwrap();

    assert_eq!(decoded, cmd);
}

#[test]
fn test_encode_decode_ping() {
    let encoded = encode_command(&Command::Ping);

    assert_eq!(encoded.len(), HEADER_SIZE);
    assert_eq!(decode_command(&encoded).unwrap(), Command::Ping);
}

#[test]
fn test_invoke_wire_layout() {
    let encoded = encode_command(&Command::invoke("seed", &[] as &[&str]));

    // cmd, payload len, fn len, "seed", argc
    let mut expected = vec![0x01u8];
    expected.extend_from_slice(&12u32.to_be_bytes());
    expected.extend_from_slice(&4u32.to_be_bytes());
    expected.extend_from_slice(b"seed");
    expected.extend_from_slice(&0u32.to_be_bytes());
    assert_eq!(encoded, expected);
}

#[test]
fn test_decode_unknown_command_type() {
    let bytes = [0x7F, 0, 0, 0, 0];
    assert!(matches!(decode_command(&bytes), Err(LedgerError::Protocol(_))));
}

#[test]
fn test_decode_incomplete_header() {
    assert!(decode_command(&[0x01, 0, 0]).is_err());
}

#[test]
fn test_decode_incomplete_payload() {
    let encoded = encode_command(&Command::invoke("getByKey", &["1"]));
    assert!(decode_command(&encoded[..encoded.len() - 1]).is_err());
}

#[test]
fn test_decode_payload_too_large() {
    let bytes = [0x01, 0xFF, 0xFF, 0xFF, 0xFF];
    match decode_command(&bytes) {
        Err(LedgerError::Protocol(msg)) => assert!(msg.contains("too large")),
        other => panic!("Expected Protocol error, got {:?}", other),
    }
}

#[test]
fn test_decode_argument_count_exceeding_payload() {
    // fn "x", argc = 1000 with no argument bytes
    let mut payload = Vec::new();
    payload.extend_from_slice(&1u32.to_be_bytes());
    payload.push(b'x');
    payload.extend_from_slice(&1000u32.to_be_bytes());

    let mut bytes = vec![0x01];
    bytes.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    bytes.extend_from_slice(&payload);

    assert!(matches!(decode_command(&bytes), Err(LedgerError::Protocol(_))));
}

#[test]
fn test_decode_invalid_utf8_rejected() {
    let mut payload = Vec::new();
    payload.extend_from_slice(&2u32.to_be_bytes());
    payload.extend_from_slice(&[0xC3, 0x28]);
    payload.extend_from_slice(&0u32.to_be_bytes());

    let mut bytes = vec![0x01];
    bytes.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    bytes.extend_from_slice(&payload);

    match decode_command(&bytes) {
        Err(LedgerError::Protocol(msg)) => assert!(msg.contains("UTF-8")),
        other => panic!("Expected Protocol error, got {:?}", other),
    }
}

#[test]
fn test_decode_ping_with_payload_rejected() {
    let bytes = [0x02, 0, 0, 0, 1, 0xAA];
    assert!(decode_command(&bytes).is_err());
}

// =============================================================================
// Response Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_decode_ok_with_payload() {
    let resp = Response::ok(Some(b"[]".to_vec()));
    let decoded = decode_response(&encode_response(&resp)).unwrap();

    assert_eq!(decoded.status, Status::Ok);
    assert_eq!(decoded.payload, Some(b"[]".to_vec()));
}

#[test]
fn test_encode_decode_ok_empty() {
    let decoded = decode_response(&encode_response(&Response::ok(None))).unwrap();

    assert!(decoded.is_ok());
    assert_eq!(decoded.payload, None);
}

#[test]
fn test_every_status_survives_the_wire() {
    for status in [
        Status::NotFound,
        Status::UnknownOperation,
        Status::InvalidArgumentCount,
        Status::WriteFailed,
        Status::ScanFailed,
        Status::Error,
    ] {
        let resp = Response::error(status, "boom");
        let decoded = decode_response(&encode_response(&resp)).unwrap();
        assert_eq!(decoded, resp);
    }
}

#[test]
fn test_decode_unknown_status() {
    let bytes = [0x42, 0, 0, 0, 0];
    assert!(decode_response(&bytes).is_err());
}

#[test]
fn test_response_from_contract_errors() {
    let cases = [
        (LedgerError::NotFound("k".into()), Status::NotFound),
        (LedgerError::UnknownOperation("x".into()), Status::UnknownOperation),
        (
            LedgerError::InvalidArgumentCount { operation: "create", expected: 3, actual: 1 },
            Status::InvalidArgumentCount,
        ),
        (
            LedgerError::WriteFailed { key: "k".into(), reason: "r".into() },
            Status::WriteFailed,
        ),
        (LedgerError::ScanFailed("s".into()), Status::ScanFailed),
        (LedgerError::Storage("s".into()), Status::Error),
    ];

    for (err, status) in cases {
        let message = err.to_string();
        let resp = Response::from_result(Err(err));
        assert_eq!(resp.status, status);
        assert_eq!(resp.text(), message);
    }
}

#[test]
fn test_response_from_empty_success_has_no_payload() {
    let resp = Response::from_result(Ok(Vec::new()));
    assert_eq!(resp, Response::ok(None));
}

// =============================================================================
// Stream Tests
// =============================================================================

#[test]
fn test_stream_command_round_trip() {
    let mut buffer = Vec::new();
    write_command(&mut buffer, &Command::invoke("getByKey", &["1"])).unwrap();
    write_command(&mut buffer, &Command::Ping).unwrap();

    let mut cursor = Cursor::new(buffer);
    assert_eq!(read_command(&mut cursor).unwrap(), Command::invoke("getByKey", &["1"]));
    assert_eq!(read_command(&mut cursor).unwrap(), Command::Ping);
}

#[test]
fn test_stream_response_round_trip() {
    let mut buffer = Vec::new();
    write_response(&mut buffer, &Response::ok(Some(b"payload".to_vec()))).unwrap();

    let mut cursor = Cursor::new(buffer);
    let resp = read_response(&mut cursor).unwrap();
    assert_eq!(resp.text(), "payload");
}

#[test]
fn test_stream_eof_is_io_error() {
    let mut cursor = Cursor::new(Vec::<u8>::new());
    assert!(matches!(read_command(&mut cursor), Err(LedgerError::Io(_))));
}
