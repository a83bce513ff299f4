//! Store Module
//!
//! The key-value boundary the contract runs against.
//!
//! ## Responsibilities
//! - Point get / point put by string key
//! - Closed-open range scans in lexicographic key order
//! - Snapshot-consistent scans within one invocation
//!
//! ## Adapters
//! - [`MemoryStore`]: BTreeMap behind a RwLock, nothing persisted
//! - [`DurableStore`]: MemoryStore index rebuilt from an append-only record log

mod memory;
mod durable;

use crate::error::Result;

pub use memory::MemoryStore;
pub use durable::DurableStore;

/// Lazy sequence of `(key, payload)` pairs produced by [`RecordStore::scan`]
pub type ScanIter<'a> = Box<dyn Iterator<Item = Result<(String, Vec<u8>)>> + Send + 'a>;

/// Key-value store consumed by the contract
pub trait RecordStore: Send + Sync {
    /// Get the payload stored at `key`, if any
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` at `key`, overwriting any existing payload
    fn put(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Iterate entries with `start <= key < end` in key order
    ///
    /// An empty or inverted window yields nothing.
    fn scan(&self, start: &str, end: &str) -> Result<ScanIter<'_>>;
}
