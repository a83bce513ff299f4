//! Protocol Module
//!
//! Defines the wire protocol for hosting the contract over TCP.
//!
//! ## Protocol Format (V1 - Simple Binary)
//!
//! ### Request Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Cmd (1)  │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Commands
//! - 0x01: INVOKE - Payload: function name + argument list
//! - 0x02: PING   - Payload: empty
//!
//! ### Response Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │Status(1) │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Status Codes
//! - 0x00: OK
//! - 0x01: NOT_FOUND
//! - 0x02: UNKNOWN_OPERATION
//! - 0x03: INVALID_ARGUMENT_COUNT
//! - 0x04: WRITE_FAILED
//! - 0x05: SCAN_FAILED
//! - 0x06: ERROR
//!
//! Non-OK responses carry the error message as payload.

mod command;
mod response;
mod codec;

pub use command::{Command, CommandType};
pub use response::{Response, Status};
pub use codec::{encode_command, decode_command, encode_response, decode_response};
pub use codec::{read_command, write_command, read_response, write_response};
pub use codec::{HEADER_SIZE, MAX_PAYLOAD_SIZE};
