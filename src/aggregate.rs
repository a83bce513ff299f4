//! Result Aggregator
//!
//! Folds a stream of `(key, record)` pairs from a range scan into a single
//! JSON array, written straight into one byte buffer.
//!
//! ## Output Format
//! ```text
//! [{"Key":"1","Record":{...}},{"Key":"2","Record":{...}}]
//! ```
//!
//! ## State Machine
//! ```text
//!            push (no separator)        push (separator + element)
//!   ┌───────┐ ─────────────────► ┌──────────────┐ ──┐
//!   │ Empty │                    │ Accumulating │   │
//!   └───┬───┘                    └──────┬───────┘ ◄─┘
//!       │ finish / abort                │ finish / abort
//!       ▼                               ▼
//!   ┌────────────────────────────────────────┐
//!   │                Closed                  │
//!   └────────────────────────────────────────┘
//! ```
//! The separator is written *before* every element except the first, so the
//! aggregator never needs to know whether another element follows.

use serde_json::value::RawValue;

use crate::error::{LedgerError, Result};

const OPEN: u8 = b'[';
const CLOSE: u8 = b']';
const SEPARATOR: u8 = b',';

/// Aggregator lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateState {
    /// Opening delimiter written, no elements yet
    Empty,

    /// At least one element written
    Accumulating,

    /// Closing delimiter written, or aborted after an error
    Closed,
}

/// Streaming builder for the `listAll` JSON array
pub struct ResultAggregator {
    buffer: Vec<u8>,
    state: AggregateState,
    count: usize,
}

impl ResultAggregator {
    /// Create an aggregator with the opening delimiter already written
    pub fn new() -> Self {
        let mut buffer = Vec::with_capacity(256);
        buffer.push(OPEN);
        Self {
            buffer,
            state: AggregateState::Empty,
            count: 0,
        }
    }

    /// Fold a scan into a finished aggregate
    ///
    /// Any error from the scan (or an element that cannot be embedded)
    /// discards the partial buffer and surfaces as `ScanFailed`.
    pub fn fold<I>(entries: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = Result<(String, Vec<u8>)>>,
    {
        let mut aggregator = Self::new();

        for entry in entries {
            let (key, record) = match entry {
                Ok(pair) => pair,
                Err(e) => {
                    aggregator.abort();
                    return Err(match e {
                        LedgerError::ScanFailed(msg) => LedgerError::ScanFailed(msg),
                        other => LedgerError::ScanFailed(other.to_string()),
                    });
                }
            };
            aggregator.push(&key, &record)?;
        }

        aggregator.finish()
    }

    /// Append one `{"Key": key, "Record": record}` element
    ///
    /// `record` must be a JSON document; it is embedded as a nested value,
    /// not as an escaped string.
    pub fn push(&mut self, key: &str, record: &[u8]) -> Result<()> {
        if self.state == AggregateState::Closed {
            return Err(LedgerError::ScanFailed(format!(
                "aggregate already closed, cannot add key {}",
                key
            )));
        }

        let raw: &RawValue = match serde_json::from_slice(record) {
            Ok(raw) => raw,
            Err(e) => {
                self.abort();
                return Err(LedgerError::ScanFailed(format!(
                    "record at key {} is not valid JSON: {}",
                    key, e
                )));
            }
        };

        match self.state {
            AggregateState::Empty => self.state = AggregateState::Accumulating,
            AggregateState::Accumulating => self.buffer.push(SEPARATOR),
            AggregateState::Closed => unreachable!("checked above"),
        }

        self.buffer.extend_from_slice(b"{\"Key\":");
        serde_json::to_writer(&mut self.buffer, key)?;
        self.buffer.extend_from_slice(b",\"Record\":");
        self.buffer.extend_from_slice(raw.get().as_bytes());
        self.buffer.push(b'}');

        self.count += 1;
        Ok(())
    }

    /// Write the closing delimiter and hand back the finished aggregate
    pub fn finish(&mut self) -> Result<Vec<u8>> {
        if self.state == AggregateState::Closed {
            return Err(LedgerError::ScanFailed(
                "aggregate already closed".to_string(),
            ));
        }

        self.buffer.push(CLOSE);
        self.state = AggregateState::Closed;
        Ok(std::mem::take(&mut self.buffer))
    }

    /// Close without a delimiter, dropping everything written so far
    pub fn abort(&mut self) {
        self.buffer = Vec::new();
        self.state = AggregateState::Closed;
    }

    /// Current lifecycle state
    pub fn state(&self) -> AggregateState {
        self.state
    }

    /// Number of elements written
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Default for ResultAggregator {
    fn default() -> Self {
        Self::new()
    }
}
