//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Request (Command) Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Cmd (1)  │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Payload by Command Type
//! - INVOKE: fn_len (4) + fn + argc (4) + { arg_len (4) + arg } * argc
//! - PING:   empty
//!
//! ### Response Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │Status(1) │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```

use std::io::{Read, Write};

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{LedgerError, Result};
use super::{Command, CommandType, Response, Status};

/// Header size: 1 byte command/status + 4 bytes length
pub const HEADER_SIZE: usize = 5;

/// Maximum payload size (16 MB)
pub const MAX_PAYLOAD_SIZE: u32 = 16 * 1024 * 1024;

// =============================================================================
// Command Encoding/Decoding
// =============================================================================

/// Encode a command to bytes
///
/// Format: cmd_type (1) + payload_len (4) + payload
pub fn encode_command(command: &Command) -> Vec<u8> {
    let mut payload = BytesMut::new();

    if let Command::Invoke { function, args } = command {
        put_string(&mut payload, function);
        payload.put_u32(args.len() as u32);
        for arg in args {
            put_string(&mut payload, arg);
        }
    }

    frame(command.command_type() as u8, &payload)
}

/// Decode a command from bytes
pub fn decode_command(bytes: &[u8]) -> Result<Command> {
    let (cmd_type, payload) = split_frame(bytes, "Command")?;

    match cmd_type {
        t if t == CommandType::Invoke as u8 => decode_invoke_command(payload),
        t if t == CommandType::Ping as u8 => decode_ping_command(payload),
        _ => Err(LedgerError::Protocol(format!(
            "Unknown command type: 0x{:02x}",
            cmd_type
        ))),
    }
}

/// Decode INVOKE command payload
fn decode_invoke_command(mut payload: &[u8]) -> Result<Command> {
    let function = take_string(&mut payload, "INVOKE function name")?;

    if payload.remaining() < 4 {
        return Err(LedgerError::Protocol(
            "INVOKE command: missing argument count".to_string(),
        ));
    }
    let argc = payload.get_u32() as usize;

    // Every argument needs at least its 4-byte length prefix
    if argc > payload.remaining() / 4 {
        return Err(LedgerError::Protocol(format!(
            "INVOKE command: {} arguments cannot fit in {} bytes",
            argc,
            payload.remaining()
        )));
    }

    let mut args = Vec::with_capacity(argc);
    for i in 0..argc {
        args.push(take_string(&mut payload, &format!("INVOKE argument {}", i))?);
    }

    if payload.has_remaining() {
        return Err(LedgerError::Protocol(format!(
            "INVOKE command: {} trailing bytes",
            payload.remaining()
        )));
    }

    Ok(Command::Invoke { function, args })
}

/// Decode PING command payload
fn decode_ping_command(payload: &[u8]) -> Result<Command> {
    if !payload.is_empty() {
        return Err(LedgerError::Protocol(format!(
            "PING command: unexpected payload of {} bytes",
            payload.len()
        )));
    }
    Ok(Command::Ping)
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response to bytes
///
/// Format: status (1) + payload_len (4) + payload
pub fn encode_response(response: &Response) -> Vec<u8> {
    let payload = response.payload.as_deref().unwrap_or(&[]);
    frame(response.status as u8, payload)
}

/// Decode a response from bytes
pub fn decode_response(bytes: &[u8]) -> Result<Response> {
    let (status_byte, payload) = split_frame(bytes, "Response")?;

    let status = Status::from_u8(status_byte).ok_or_else(|| {
        LedgerError::Protocol(format!("Unknown response status: 0x{:02x}", status_byte))
    })?;

    let payload = if payload.is_empty() {
        None
    } else {
        Some(payload.to_vec())
    };

    Ok(Response { status, payload })
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read a complete command from a stream
///
/// Blocks until a complete command is received or an error occurs
pub fn read_command<R: Read>(reader: &mut R) -> Result<Command> {
    decode_command(&read_frame(reader)?)
}

/// Write a command to a stream
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    writer.write_all(&encode_command(command))?;
    writer.flush()?;
    Ok(())
}

/// Read a complete response from a stream
pub fn read_response<R: Read>(reader: &mut R) -> Result<Response> {
    decode_response(&read_frame(reader)?)
}

/// Write a response to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    writer.write_all(&encode_response(response))?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Private Helpers
// =============================================================================

/// Build header + payload
fn frame(tag: u8, payload: &[u8]) -> Vec<u8> {
    let mut message = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    message.put_u8(tag);
    message.put_u32(payload.len() as u32);
    message.put_slice(payload);
    message.to_vec()
}

/// Validate a complete frame and return (tag, payload)
fn split_frame<'a>(bytes: &'a [u8], what: &str) -> Result<(u8, &'a [u8])> {
    if bytes.len() < HEADER_SIZE {
        return Err(LedgerError::Protocol(format!(
            "{}: incomplete header: expected {} bytes, got {}",
            what,
            HEADER_SIZE,
            bytes.len()
        )));
    }

    let mut header = &bytes[..HEADER_SIZE];
    let tag = header.get_u8();
    let payload_len = header.get_u32();

    if payload_len > MAX_PAYLOAD_SIZE {
        return Err(LedgerError::Protocol(format!(
            "{}: payload too large: {} bytes (max {})",
            what, payload_len, MAX_PAYLOAD_SIZE
        )));
    }

    let total_len = HEADER_SIZE + payload_len as usize;
    if bytes.len() < total_len {
        return Err(LedgerError::Protocol(format!(
            "{}: incomplete payload: expected {} bytes, got {}",
            what,
            total_len,
            bytes.len()
        )));
    }

    Ok((tag, &bytes[HEADER_SIZE..total_len]))
}

/// Read one header + payload from a stream
fn read_frame<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;

    let payload_len = u32::from_be_bytes([header[1], header[2], header[3], header[4]]);
    if payload_len > MAX_PAYLOAD_SIZE {
        return Err(LedgerError::Protocol(format!(
            "Payload too large: {} bytes (max {})",
            payload_len, MAX_PAYLOAD_SIZE
        )));
    }

    let mut message = vec![0u8; HEADER_SIZE + payload_len as usize];
    message[..HEADER_SIZE].copy_from_slice(&header);
    reader.read_exact(&mut message[HEADER_SIZE..])?;

    Ok(message)
}

fn put_string(buf: &mut BytesMut, s: &str) {
    buf.put_u32(s.len() as u32);
    buf.put_slice(s.as_bytes());
}

/// Read a length-prefixed UTF-8 string
fn take_string(buf: &mut &[u8], what: &str) -> Result<String> {
    if buf.remaining() < 4 {
        return Err(LedgerError::Protocol(format!("{}: missing length", what)));
    }
    let len = buf.get_u32() as usize;

    if buf.remaining() < len {
        return Err(LedgerError::Protocol(format!(
            "{}: incomplete (expected {}, got {})",
            what,
            len,
            buf.remaining()
        )));
    }

    let bytes = buf[..len].to_vec();
    buf.advance(len);

    String::from_utf8(bytes)
        .map_err(|e| LedgerError::Protocol(format!("{}: invalid UTF-8: {}", what, e)))
}
