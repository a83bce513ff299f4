//! Operation definitions
//!
//! The closed set of operations the contract can dispatch to.

use std::fmt;
use std::str::FromStr;

use crate::error::{LedgerError, Result};

/// Operations recognized by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Fetch one record by store key
    GetByKey,

    /// Write the fixed example records
    Seed,

    /// Write one record at a caller-chosen store key
    Create,

    /// Aggregate every record in the listing window
    ListAll,
}

impl Operation {
    /// Every operation, in dispatch-table order
    pub const ALL: [Operation; 4] = [
        Operation::GetByKey,
        Operation::Seed,
        Operation::Create,
        Operation::ListAll,
    ];

    /// Name callers use to invoke the operation
    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetByKey => "getByKey",
            Operation::Seed => "seed",
            Operation::Create => "create",
            Operation::ListAll => "listAll",
        }
    }

    /// Number of positional arguments the operation takes
    pub fn arity(&self) -> usize {
        match self {
            Operation::GetByKey => 1,
            Operation::Seed => 0,
            Operation::Create => 3,
            Operation::ListAll => 0,
        }
    }

    /// Fail with `InvalidArgumentCount` unless exactly `arity()` args were given
    pub fn check_arity(&self, actual: usize) -> Result<()> {
        if actual != self.arity() {
            return Err(LedgerError::InvalidArgumentCount {
                operation: self.name(),
                expected: self.arity(),
                actual,
            });
        }
        Ok(())
    }
}

impl FromStr for Operation {
    type Err = LedgerError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "getByKey" => Ok(Operation::GetByKey),
            "seed" => Ok(Operation::Seed),
            "create" => Ok(Operation::Create),
            "listAll" => Ok(Operation::ListAll),
            other => Err(LedgerError::UnknownOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
