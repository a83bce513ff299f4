//! Durable store
//!
//! MemoryStore index backed by an append-only record log.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::Result;
use crate::log::{LogRecovery, LogWriter, RecoveryResult};

use super::{MemoryStore, RecordStore, ScanIter};

/// Record store that survives restarts
///
/// ## Write Path
/// put → log mutex → append frame (fsync per strategy) → index insert
///
/// The index is updated while the log mutex is still held, so readers see
/// puts in log order and never see a put the log does not contain.
pub struct DurableStore {
    /// Latest payload per key, rebuilt from the log on open
    index: MemoryStore,

    /// Append handle (exclusive access needed)
    log: Mutex<LogWriter>,

    log_path: PathBuf,

    /// What replay found when the store was opened
    recovery: RecoveryResult,
}

impl DurableStore {
    const LOG_FILENAME: &'static str = "records.log";

    /// Open or create a store under `config.data_dir`
    ///
    /// On startup:
    /// 1. Create the data directory
    /// 2. Replay the record log into the index (truncating a damaged tail)
    /// 3. Reopen the log for appends after the last recovered LSN
    pub fn open(config: &Config) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)?;
        let log_path = config.data_dir.join(Self::LOG_FILENAME);

        let (entries, recovery) = LogRecovery::recover(&log_path)?;

        let index = MemoryStore::new();
        for entry in entries {
            index.insert(entry.record.key, entry.record.value);
        }

        if recovery.entries_recovered > 0 || recovery.was_truncated {
            tracing::info!(
                "Record log recovery: {} entries recovered, {} bytes truncated, last_lsn={}",
                recovery.entries_recovered,
                recovery.bytes_truncated,
                recovery.last_lsn
            );
        }

        let log = LogWriter::open(&log_path, config.sync_strategy, recovery.last_lsn)?;

        Ok(Self {
            index,
            log: Mutex::new(log),
            log_path,
            recovery,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().data_dir(path).build();
        Self::open(&config)
    }

    /// Force the log to disk
    pub fn sync(&self) -> Result<()> {
        self.log.lock().sync()
    }

    /// Close the store gracefully
    pub fn close(self) -> Result<()> {
        self.sync()
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Path of the record log
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Replay statistics from open
    pub fn recovery(&self) -> &RecoveryResult {
        &self.recovery
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl RecordStore for DurableStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.index.get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut log = self.log.lock();
        let lsn = log.append(key, value)?;
        self.index.insert(key.to_string(), value.to_vec());

        tracing::trace!("Logged key {} at lsn {}", key, lsn);
        Ok(())
    }

    fn scan(&self, start: &str, end: &str) -> Result<ScanIter<'_>> {
        self.index.scan(start, end)
    }
}
