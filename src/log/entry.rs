//! Log Entry definitions
//!
//! Defines the structure and framing of individual record log entries.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// Frame header: LSN (8) + CRC (4) + Len (4)
pub const HEADER_SIZE: usize = 16;

/// Largest data section accepted when decoding (64 MB)
pub const MAX_DATA_SIZE: u32 = 64 * 1024 * 1024;

/// The body of a log entry (bincode-encoded on disk)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Store key the payload was written under
    pub key: String,

    /// Payload bytes
    pub value: Vec<u8>,

    /// Timestamp (unix millis) when the entry was created
    pub timestamp: u64,
}

/// A single entry in the record log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Log Sequence Number - monotonically increasing
    pub lsn: u64,

    pub record: LogRecord,
}

impl LogEntry {
    /// Create a put entry stamped with the current time
    pub fn new(lsn: u64, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        Self {
            lsn,
            record: LogRecord {
                key: key.into(),
                value: value.into(),
                timestamp,
            },
        }
    }

    /// Encode as one frame: LSN + CRC + Len + Data
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let data = bincode::serialize(&self.record)?;
        let crc = crc32fast::hash(&data);

        let mut frame = Vec::with_capacity(HEADER_SIZE + data.len());
        frame.extend_from_slice(&self.lsn.to_be_bytes());
        frame.extend_from_slice(&crc.to_be_bytes());
        frame.extend_from_slice(&(data.len() as u32).to_be_bytes());
        frame.extend_from_slice(&data);

        Ok(frame)
    }

    /// Decode the frame at the start of `bytes`
    ///
    /// Returns the entry and the number of bytes consumed. A short buffer or
    /// checksum mismatch is reported as `LogCorruption`.
    pub fn deserialize(bytes: &[u8]) -> Result<(Self, usize)> {
        if bytes.len() < HEADER_SIZE {
            return Err(LedgerError::LogCorruption(format!(
                "Incomplete header: expected {} bytes, got {}",
                HEADER_SIZE,
                bytes.len()
            )));
        }

        let lsn = u64::from_be_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]);
        let crc = u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        let data_len = u32::from_be_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);

        if data_len > MAX_DATA_SIZE {
            return Err(LedgerError::LogCorruption(format!(
                "Entry {} data too large: {} bytes (max {})",
                lsn, data_len, MAX_DATA_SIZE
            )));
        }

        let total_len = HEADER_SIZE + data_len as usize;
        if bytes.len() < total_len {
            return Err(LedgerError::LogCorruption(format!(
                "Incomplete entry {}: expected {} bytes, got {}",
                lsn,
                total_len,
                bytes.len()
            )));
        }

        let data = &bytes[HEADER_SIZE..total_len];
        let actual_crc = crc32fast::hash(data);
        if actual_crc != crc {
            return Err(LedgerError::LogCorruption(format!(
                "CRC mismatch for entry {}: stored {:08x}, computed {:08x}",
                lsn, crc, actual_crc
            )));
        }

        let record: LogRecord = bincode::deserialize(data)?;
        Ok((Self { lsn, record }, total_len))
    }
}
