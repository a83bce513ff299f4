//! Record Model
//!
//! The in-memory shape of one group record and its JSON encoding.
//!
//! ## Serialized Form
//! ```text
//! {"groupId":"001","groupName":"AC17","groupDesc":"Description for AB17"}
//! ```
//! Field names are fixed; field order is not significant.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single group record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Caller-supplied identifier (independent of the store key)
    #[serde(rename = "groupId")]
    pub id: String,

    #[serde(rename = "groupName")]
    pub name: String,

    #[serde(rename = "groupDesc")]
    pub description: String,
}

impl Record {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }

    /// Encode to the stored JSON payload
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode a stored JSON payload
    ///
    /// All three fields are required; a payload missing any of them fails.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
