//! Response definitions
//!
//! Represents responses to clients.

use crate::error::{LedgerError, Result};

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    Ok = 0x00,
    NotFound = 0x01,
    UnknownOperation = 0x02,
    InvalidArgumentCount = 0x03,
    WriteFailed = 0x04,
    ScanFailed = 0x05,
    Error = 0x06,
}

impl Status {
    /// Parse a status byte
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Status::Ok),
            0x01 => Some(Status::NotFound),
            0x02 => Some(Status::UnknownOperation),
            0x03 => Some(Status::InvalidArgumentCount),
            0x04 => Some(Status::WriteFailed),
            0x05 => Some(Status::ScanFailed),
            0x06 => Some(Status::Error),
            _ => None,
        }
    }
}

impl From<&LedgerError> for Status {
    fn from(err: &LedgerError) -> Self {
        match err {
            LedgerError::NotFound(_) => Status::NotFound,
            LedgerError::UnknownOperation(_) => Status::UnknownOperation,
            LedgerError::InvalidArgumentCount { .. } => Status::InvalidArgumentCount,
            LedgerError::WriteFailed { .. } => Status::WriteFailed,
            LedgerError::ScanFailed(_) => Status::ScanFailed,
            _ => Status::Error,
        }
    }
}

/// A response to send to client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code
    pub status: Status,

    /// Optional payload (operation result for OK, error message otherwise)
    pub payload: Option<Vec<u8>>,
}

impl Response {
    /// Create an OK response with optional payload
    pub fn ok(payload: Option<Vec<u8>>) -> Self {
        Self {
            status: Status::Ok,
            payload,
        }
    }

    /// Create a failure response carrying a message
    pub fn error(status: Status, message: &str) -> Self {
        Self {
            status,
            payload: Some(message.as_bytes().to_vec()),
        }
    }

    /// Wrap the outcome of a contract invocation
    pub fn from_result(result: Result<Vec<u8>>) -> Self {
        match result {
            Ok(payload) if payload.is_empty() => Self::ok(None),
            Ok(payload) => Self::ok(Some(payload)),
            Err(e) => Self::error(Status::from(&e), &e.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    /// Payload as text (empty if none)
    pub fn text(&self) -> String {
        self.payload
            .as_deref()
            .map(|p| String::from_utf8_lossy(p).into_owned())
            .unwrap_or_default()
    }
}
