//! In-memory store
//!
//! BTreeMap-based store with RwLock for concurrency.

use std::collections::BTreeMap;
use std::ops::Bound;

use parking_lot::RwLock;

use crate::error::Result;

use super::{RecordStore, ScanIter};

/// In-memory record store
///
/// ## Concurrency:
/// - Point reads and scans take the read lock
/// - Puts take the write lock, so each put is atomic and last write wins
/// - A scan copies its key window under one read lock, giving the caller a
///   snapshot that concurrent puts cannot change mid-iteration
pub struct MemoryStore {
    data: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Get entry count
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Insert without going through the trait (used by log replay)
    pub(crate) fn insert(&self, key: String, value: Vec<u8>) {
        self.data.write().insert(key, value);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn scan(&self, start: &str, end: &str) -> Result<ScanIter<'_>> {
        // BTreeMap::range panics on an inverted range
        if start >= end {
            return Ok(Box::new(std::iter::empty()));
        }

        let snapshot: Vec<(String, Vec<u8>)> = self
            .data
            .read()
            .range::<str, _>((Bound::Included(start), Bound::Excluded(end)))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Box::new(snapshot.into_iter().map(Ok)))
    }
}
