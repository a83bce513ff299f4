//! Result Aggregator Tests
//!
//! Tests verify:
//! - Separator placement for 0, 1 and many elements
//! - Records are nested JSON values, not strings
//! - State transitions Empty → Accumulating → Closed
//! - Errors discard the partial aggregate

use groupledger::aggregate::{AggregateState, ResultAggregator};
use groupledger::{LedgerError, Result};
use serde_json::Value;

// =============================================================================
// Helper Functions
// =============================================================================

fn record(id: &str) -> Vec<u8> {
    format!(r#"{{"groupId":"{0}","groupName":"N{0}","groupDesc":"D{0}"}}"#, id).into_bytes()
}

fn entries(keys: &[&str]) -> Vec<Result<(String, Vec<u8>)>> {
    keys.iter().map(|k| Ok((k.to_string(), record(k)))).collect()
}

// =============================================================================
// Separator Placement Tests
// =============================================================================

#[test]
fn test_fold_empty_is_empty_array() {
    let out = ResultAggregator::fold(Vec::<Result<(String, Vec<u8>)>>::new()).unwrap();
    assert_eq!(out, b"[]");
}

#[test]
fn test_fold_single_element_has_no_separator() {
    let out = ResultAggregator::fold(entries(&["1"])).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        r#"[{"Key":"1","Record":{"groupId":"1","groupName":"N1","groupDesc":"D1"}}]"#
    );
}

#[test]
fn test_fold_many_elements_separated_once() {
    let out = ResultAggregator::fold(entries(&["1", "2", "3"])).unwrap();
    let text = String::from_utf8(out.clone()).unwrap();

    assert!(text.starts_with("[{"));
    assert!(text.ends_with("}]"));
    assert!(!text.contains(",,"));
    assert!(!text.contains("[,"));
    assert!(!text.contains(",]"));

    let value: Value = serde_json::from_slice(&out).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["Key"], "1");
    assert_eq!(items[2]["Key"], "3");
}

#[test]
fn test_record_is_nested_object() {
    let out = ResultAggregator::fold(entries(&["7"])).unwrap();
    let value: Value = serde_json::from_slice(&out).unwrap();

    let nested = &value[0]["Record"];
    assert!(nested.is_object());
    assert_eq!(nested["groupName"], "N7");
}

#[test]
fn test_whitespace_in_payload_is_tolerated() {
    let payload = b"  {\"groupId\": \"x\"}\n".to_vec();
    let scan: Vec<Result<(String, Vec<u8>)>> = vec![Ok(("5".to_string(), payload))];
    let out = ResultAggregator::fold(scan).unwrap();
    let value: Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(value[0]["Record"]["groupId"], "x");
}

#[test]
fn test_key_is_escaped() {
    let scan: Vec<Result<(String, Vec<u8>)>> = vec![Ok(("a\"b".to_string(), record("1")))];
    let out = ResultAggregator::fold(scan).unwrap();
    let value: Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(value[0]["Key"], "a\"b");
}

// =============================================================================
// State Machine Tests
// =============================================================================

#[test]
fn test_state_transitions() {
    let mut agg = ResultAggregator::new();
    assert_eq!(agg.state(), AggregateState::Empty);
    assert!(agg.is_empty());

    agg.push("1", &record("1")).unwrap();
    assert_eq!(agg.state(), AggregateState::Accumulating);

    agg.push("2", &record("2")).unwrap();
    assert_eq!(agg.state(), AggregateState::Accumulating);
    assert_eq!(agg.len(), 2);

    let out = agg.finish().unwrap();
    assert_eq!(agg.state(), AggregateState::Closed);
    assert_eq!(serde_json::from_slice::<Value>(&out).unwrap().as_array().unwrap().len(), 2);
}

#[test]
fn test_finish_from_empty() {
    let mut agg = ResultAggregator::new();
    assert_eq!(agg.finish().unwrap(), b"[]");
    assert_eq!(agg.state(), AggregateState::Closed);
}

#[test]
fn test_push_after_close_fails() {
    let mut agg = ResultAggregator::new();
    agg.finish().unwrap();

    let result = agg.push("1", &record("1"));
    assert!(matches!(result, Err(LedgerError::ScanFailed(_))));
}

#[test]
fn test_finish_twice_fails() {
    let mut agg = ResultAggregator::new();
    agg.finish().unwrap();

    assert!(agg.finish().is_err());
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_scan_error_discards_partial_result() {
    let mut scan = entries(&["1", "2"]);
    scan.push(Err(LedgerError::Storage("disk went away".to_string())));
    scan.extend(entries(&["3"]));

    let result = ResultAggregator::fold(scan);

    match result {
        Err(LedgerError::ScanFailed(msg)) => assert!(msg.contains("disk went away")),
        other => panic!("Expected ScanFailed, got {:?}", other),
    }
}

#[test]
fn test_scan_error_on_first_element() {
    let scan: Vec<Result<(String, Vec<u8>)>> = vec![Err(LedgerError::Storage("boom".to_string()))];
    assert!(matches!(ResultAggregator::fold(scan), Err(LedgerError::ScanFailed(_))));
}

#[test]
fn test_scan_failed_is_not_double_wrapped() {
    let scan: Vec<Result<(String, Vec<u8>)>> =
        vec![Err(LedgerError::ScanFailed("iterator closed".to_string()))];

    match ResultAggregator::fold(scan) {
        Err(LedgerError::ScanFailed(msg)) => assert_eq!(msg, "iterator closed"),
        other => panic!("Expected ScanFailed, got {:?}", other),
    }
}

#[test]
fn test_invalid_payload_aborts() {
    let mut agg = ResultAggregator::new();
    agg.push("1", &record("1")).unwrap();

    let result = agg.push("2", b"{not json");

    match result {
        Err(LedgerError::ScanFailed(msg)) => assert!(msg.contains("key 2")),
        other => panic!("Expected ScanFailed, got {:?}", other),
    }
    assert_eq!(agg.state(), AggregateState::Closed);
}
