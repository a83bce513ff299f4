//! Record Log Module
//!
//! Append-only log that makes [`DurableStore`](crate::store::DurableStore)
//! writes survive restarts.
//!
//! ## Responsibilities
//! - Append every put before it becomes visible
//! - CRC32 checksums for corruption detection
//! - Log Sequence Numbers (LSN) for ordering
//! - Replay on open, cutting off partial writes at the tail
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Entry 1                                 │
//! │ ┌─────────┬─────────┬────────┬────────┐ │
//! │ │ LSN (8) │ CRC (4) │Len (4) │ Data   │ │
//! │ └─────────┴─────────┴────────┴────────┘ │
//! ├─────────────────────────────────────────┤
//! │ Entry 2                                 │
//! │ ┌─────────┬─────────┬────────┬────────┐ │
//! │ │ LSN (8) │ CRC (4) │Len (4) │ Data   │ │
//! │ └─────────┴─────────┴────────┴────────┘ │
//! └─────────────────────────────────────────┘
//! ```
//! Integers are big-endian. Data is the bincode encoding of
//! `{ key, value, timestamp }` and the CRC covers Data only.

mod entry;
mod writer;
mod reader;
mod recovery;

pub use entry::{LogEntry, LogRecord, HEADER_SIZE};
pub use writer::{LogSink, LogWriter};
pub use reader::LogReader;
pub use recovery::{LogRecovery, RecoveryResult};
