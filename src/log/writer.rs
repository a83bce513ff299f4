//! Log Writer
//!
//! Handles appending entries to the record log.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::config::SyncStrategy;
use crate::error::{LedgerError, Result};
use super::LogEntry;

/// Destination the writer appends frames to
///
/// Writes always land at the current end, so after `truncate` the next
/// frame starts at the cut.
pub trait LogSink: Write + Send {
    /// Flush written bytes to stable storage
    fn sync_data(&self) -> io::Result<()>;

    /// Cut the sink back to `len` bytes
    fn truncate(&mut self, len: u64) -> io::Result<()>;
}

impl LogSink for File {
    fn sync_data(&self) -> io::Result<()> {
        File::sync_data(self)
    }

    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

/// Appends entries to the record log
///
/// A failed append is rolled back: the partial frame is cut off and its LSN
/// is handed to the next append. If the cut itself fails the writer refuses
/// further appends until the log is reopened and recovered.
pub struct LogWriter<S: LogSink = File> {
    sink: S,

    /// Bytes of whole frames in the sink
    len: u64,

    /// LSN assigned to the next append
    next_lsn: u64,

    sync_strategy: SyncStrategy,

    /// Appends written since the last fsync
    unsynced: usize,

    poisoned: bool,
}

impl LogWriter<File> {
    /// Open or create a log file, continuing after `last_lsn`
    pub fn open(path: &Path, sync_strategy: SyncStrategy, last_lsn: u64) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let len = file.metadata()?.len();

        Ok(Self::with_sink(file, len, sync_strategy, last_lsn))
    }
}

impl<S: LogSink> LogWriter<S> {
    /// Append to `sink`, which already holds `len` bytes of whole frames
    pub fn with_sink(sink: S, len: u64, sync_strategy: SyncStrategy, last_lsn: u64) -> Self {
        Self {
            sink,
            len,
            next_lsn: last_lsn + 1,
            sync_strategy,
            unsynced: 0,
            poisoned: false,
        }
    }

    /// Append a put entry, returning its LSN
    ///
    /// The frame is flushed to the OS before returning; fsync follows the
    /// configured strategy. On error nothing of the frame stays in the log.
    pub fn append(&mut self, key: &str, value: &[u8]) -> Result<u64> {
        if self.poisoned {
            return Err(LedgerError::Storage(
                "record log is unusable after a failed rollback, reopen the store".to_string(),
            ));
        }

        let lsn = self.next_lsn;
        let frame = LogEntry::new(lsn, key, value).serialize()?;

        if let Err(e) = self.write_frame(&frame) {
            self.rollback();
            return Err(e.into());
        }

        let due = match self.sync_strategy {
            SyncStrategy::EveryWrite => true,
            SyncStrategy::EveryNEntries { count } => self.unsynced + 1 >= count,
        };
        if due {
            if let Err(e) = self.sink.sync_data() {
                self.rollback();
                return Err(e.into());
            }
            self.unsynced = 0;
        } else {
            self.unsynced += 1;
        }

        self.len += frame.len() as u64;
        self.next_lsn += 1;
        Ok(lsn)
    }

    /// Force sync to disk
    pub fn sync(&mut self) -> Result<()> {
        self.sink.flush()?;
        self.sink.sync_data()?;
        self.unsynced = 0;
        Ok(())
    }

    /// LSN the next append will receive
    pub fn next_lsn(&self) -> u64 {
        self.next_lsn
    }

    /// Bytes of whole frames written so far
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether a failed rollback has disabled appends
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        self.sink.write_all(frame)?;
        self.sink.flush()
    }

    fn rollback(&mut self) {
        if let Err(e) = self.sink.truncate(self.len) {
            tracing::error!("Failed to roll back record log to {} bytes: {}", self.len, e);
            self.poisoned = true;
        } else {
            tracing::warn!("Rolled back failed append at lsn {}", self.next_lsn);
        }
    }
}
