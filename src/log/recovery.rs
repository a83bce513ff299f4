//! Log Recovery
//!
//! Rebuilds state from the record log after a restart or crash.

use std::fs::OpenOptions;
use std::path::Path;

use crate::error::{LedgerError, Result};
use super::{LogEntry, LogReader};

/// Handles record log recovery
pub struct LogRecovery;

/// Result of a recovery operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecoveryResult {
    /// Number of entries successfully recovered
    pub entries_recovered: u64,

    /// Last valid LSN (0 if the log is empty)
    pub last_lsn: u64,

    /// Length of the valid prefix of the log
    pub valid_bytes: u64,

    /// Bytes after the valid prefix (partial or corrupt tail)
    pub bytes_truncated: u64,

    /// Whether the file was cut back to the valid prefix
    pub was_truncated: bool,
}

impl LogRecovery {
    /// Recover entries from a log file
    ///
    /// This will:
    /// 1. Read entries until the end of the log or the first bad frame
    /// 2. Truncate everything after the last good frame
    /// 3. Return all valid entries in order
    ///
    /// A missing file recovers as an empty log.
    pub fn recover(path: &Path) -> Result<(Vec<LogEntry>, RecoveryResult)> {
        if !path.exists() {
            return Ok((Vec::new(), RecoveryResult::default()));
        }

        let (entries, mut result) = Self::read_valid_prefix(path)?;

        if result.bytes_truncated > 0 {
            let file = OpenOptions::new().write(true).open(path)?;
            file.set_len(result.valid_bytes)?;
            file.sync_all()?;
            result.was_truncated = true;

            tracing::warn!(
                "Truncated {} bytes from {} after LSN {}",
                result.bytes_truncated,
                path.display(),
                result.last_lsn
            );
        }

        Ok((entries, result))
    }

    /// Verify integrity of a log file without modifying it
    pub fn verify(path: &Path) -> Result<RecoveryResult> {
        let (_, result) = Self::read_valid_prefix(path)?;
        Ok(result)
    }

    fn read_valid_prefix(path: &Path) -> Result<(Vec<LogEntry>, RecoveryResult)> {
        let mut reader = LogReader::open(path)?;
        let mut entries = Vec::new();

        loop {
            match reader.next_entry() {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => break,
                Err(LedgerError::LogCorruption(msg)) => {
                    tracing::warn!("Stopping replay of {}: {}", path.display(), msg);
                    break;
                }
                Err(LedgerError::Serialization(msg)) => {
                    tracing::warn!("Undecodable entry in {}: {}", path.display(), msg);
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        let valid_bytes = reader.offset() as u64;
        let result = RecoveryResult {
            entries_recovered: entries.len() as u64,
            last_lsn: reader.last_lsn(),
            valid_bytes,
            bytes_truncated: reader.len() as u64 - valid_bytes,
            was_truncated: false,
        };

        Ok((entries, result))
    }
}
