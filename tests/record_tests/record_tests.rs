//! Record Tests
//!
//! Tests verify:
//! - Fixed JSON field names
//! - Decoding is insensitive to field order
//! - Missing fields are rejected

use groupledger::{LedgerError, Record};
use serde_json::Value;

#[test]
fn test_serialized_field_names() {
    let record = Record::new("001", "AC17", "Description for AB17");
    let value: Value = serde_json::from_slice(&record.to_bytes().unwrap()).unwrap();

    assert_eq!(value["groupId"], "001");
    assert_eq!(value["groupName"], "AC17");
    assert_eq!(value["groupDesc"], "Description for AB17");
    assert_eq!(value.as_object().unwrap().len(), 3);
}

#[test]
fn test_decode_written_payload() {
    let record = Record::new("id-7", "Beta", "Second group");
    let decoded = Record::from_bytes(&record.to_bytes().unwrap()).unwrap();

    assert_eq!(decoded, record);
}

#[test]
fn test_decode_ignores_field_order() {
    let payload = br#"{"groupDesc":"d","groupId":"i","groupName":"n"}"#;
    let record = Record::from_bytes(payload).unwrap();

    assert_eq!(record, Record::new("i", "n", "d"));
}

#[test]
fn test_decode_rejects_missing_field() {
    let payload = br#"{"groupId":"i","groupName":"n"}"#;
    let result = Record::from_bytes(payload);

    assert!(matches!(result, Err(LedgerError::Serialization(_))));
}

#[test]
fn test_decode_rejects_non_json() {
    assert!(Record::from_bytes(b"not json").is_err());
}

#[test]
fn test_special_characters_survive() {
    let record = Record::new("q\"uote", "line\nbreak", "ünïcødé");
    let decoded = Record::from_bytes(&record.to_bytes().unwrap()).unwrap();

    assert_eq!(decoded, record);
}
