//! Contract Module
//!
//! Routes named invocations to operation handlers.
//!
//! ## Responsibilities
//! - Map a function name to an [`Operation`] (unknown names are rejected)
//! - Run the handler, which checks its own argument count first
//! - Translate store failures into `WriteFailed` / `ScanFailed`
//!
//! ## Operations
//! | Name       | Args                           | Success payload        |
//! |------------|--------------------------------|------------------------|
//! | `getByKey` | `[key]`                        | stored record, as-is   |
//! | `create`   | `[key, name, description]`     | empty                  |
//! | `seed`     | none                           | empty                  |
//! | `listAll`  | none                           | JSON array of records  |

mod operation;

use std::sync::Arc;

use crate::aggregate::ResultAggregator;
use crate::error::{LedgerError, Result};
use crate::record::Record;
use crate::store::RecordStore;

pub use operation::Operation;

/// First key (inclusive) of the `listAll` window
pub const LIST_START_KEY: &str = "0";

/// End key (exclusive) of the `listAll` window; compared as strings
pub const LIST_END_KEY: &str = "9999";

/// Example records written by `seed`, as (id, name, description)
///
/// Entry `i` is stored at key `i + 1`.
pub const SEED_RECORDS: [(&str, &str, &str); 2] = [
    ("001", "AC17", "Description for AB17"),
    ("002", "AC18", "Description for AB18"),
];

/// Operation dispatcher over a record store
///
/// Holds no state of its own; concurrent invocations only meet in the store.
pub struct Contract {
    store: Arc<dyn RecordStore>,
}

impl Contract {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Invoke an operation by name
    pub fn invoke<A: AsRef<str>>(&self, function: &str, args: &[A]) -> Result<Vec<u8>> {
        let operation: Operation = function.parse()?;
        tracing::debug!("Dispatching {} with {} args", operation, args.len());
        self.execute(operation, args)
    }

    /// Execute an already-resolved operation
    pub fn execute<A: AsRef<str>>(&self, operation: Operation, args: &[A]) -> Result<Vec<u8>> {
        match operation {
            Operation::GetByKey => self.get_by_key(args),
            Operation::Seed => {
                self.seed(args)?;
                Ok(Vec::new())
            }
            Operation::Create => {
                self.create(args)?;
                Ok(Vec::new())
            }
            Operation::ListAll => self.list_all(args),
        }
    }

    /// `getByKey [key]` - the stored payload, byte-for-byte
    pub fn get_by_key<A: AsRef<str>>(&self, args: &[A]) -> Result<Vec<u8>> {
        Operation::GetByKey.check_arity(args.len())?;
        let key = args[0].as_ref();

        match self.store.get(key)? {
            Some(payload) => Ok(payload),
            None => Err(LedgerError::NotFound(key.to_string())),
        }
    }

    /// `create [key, name, description]`
    ///
    /// The record's `id` is taken from the same argument as its `name`;
    /// `key` only addresses the entry and is not copied into the record.
    pub fn create<A: AsRef<str>>(&self, args: &[A]) -> Result<()> {
        Operation::Create.check_arity(args.len())?;
        let key = args[0].as_ref();
        let name = args[1].as_ref();
        let description = args[2].as_ref();

        let record = Record::new(name, name, description);
        self.write_record(key, &record)?;

        tracing::debug!("Created record {:?} at key {}", record.id, key);
        Ok(())
    }

    /// `seed` - write [`SEED_RECORDS`] at keys "1", "2", ...
    ///
    /// Stops at the first failed write; earlier records stay written.
    pub fn seed<A: AsRef<str>>(&self, args: &[A]) -> Result<()> {
        Operation::Seed.check_arity(args.len())?;

        for (i, (id, name, description)) in SEED_RECORDS.iter().enumerate() {
            let key = (i + 1).to_string();
            let record = Record::new(*id, *name, *description);
            self.write_record(&key, &record)?;
            tracing::info!("Added {:?} at key {}", record, key);
        }

        Ok(())
    }

    /// `listAll` - every record with `LIST_START_KEY <= key < LIST_END_KEY`
    pub fn list_all<A: AsRef<str>>(&self, args: &[A]) -> Result<Vec<u8>> {
        Operation::ListAll.check_arity(args.len())?;

        let entries = self
            .store
            .scan(LIST_START_KEY, LIST_END_KEY)
            .map_err(|e| LedgerError::ScanFailed(e.to_string()))?;
        let aggregate = ResultAggregator::fold(entries)?;

        tracing::debug!("listAll produced {} bytes", aggregate.len());
        tracing::trace!("listAll: {}", String::from_utf8_lossy(&aggregate));
        Ok(aggregate)
    }

    fn write_record(&self, key: &str, record: &Record) -> Result<()> {
        let payload = record.to_bytes()?;
        self.store
            .put(key, &payload)
            .map_err(|e| LedgerError::WriteFailed {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }
}
