//! Log Reader
//!
//! Walks the frames of a record log in order.

use std::fs;
use std::path::Path;

use crate::error::{LedgerError, Result};
use super::LogEntry;

/// Reads entries from a record log
///
/// The whole file is loaded up front; the log is always replayed in full.
pub struct LogReader {
    data: Vec<u8>,
    offset: usize,
    last_lsn: u64,
}

impl LogReader {
    /// Open a log file for reading
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::from_bytes(fs::read(path)?))
    }

    /// Read frames from an in-memory buffer
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self {
            data,
            offset: 0,
            last_lsn: 0,
        }
    }

    /// Read the next entry
    ///
    /// Returns `Ok(None)` at a clean end of log. The offset only advances
    /// past frames that decoded successfully.
    pub fn next_entry(&mut self) -> Result<Option<LogEntry>> {
        if self.offset >= self.data.len() {
            return Ok(None);
        }

        let (entry, consumed) = LogEntry::deserialize(&self.data[self.offset..])?;

        if entry.lsn <= self.last_lsn {
            return Err(LedgerError::LogCorruption(format!(
                "LSN went backwards at offset {}: {} after {}",
                self.offset, entry.lsn, self.last_lsn
            )));
        }

        self.offset += consumed;
        self.last_lsn = entry.lsn;
        Ok(Some(entry))
    }

    /// Byte offset just past the last good frame
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// LSN of the last good frame (0 if none)
    pub fn last_lsn(&self) -> u64 {
        self.last_lsn
    }

    /// Total bytes in the log
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
