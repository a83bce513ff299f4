//! TCP Client
//!
//! Blocking client for a GroupLedger server.

use std::io::{BufReader, BufWriter};
use std::net::TcpStream;

use crate::error::{LedgerError, Result};
use crate::protocol::{read_response, write_command, Command, Response};

/// A connection to a GroupLedger server
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl Client {
    /// Connect to `addr` (host:port)
    pub fn connect(addr: &str) -> Result<Self> {
        let stream = TcpStream::connect(addr)
            .map_err(|e| LedgerError::Network(format!("Failed to connect to {}: {}", addr, e)))?;
        stream.set_nodelay(true)?;

        Ok(Self {
            reader: BufReader::new(stream.try_clone()?),
            writer: BufWriter::new(stream),
        })
    }

    /// Invoke an operation and wait for its response
    pub fn invoke<A: AsRef<str>>(&mut self, function: &str, args: &[A]) -> Result<Response> {
        self.call(&Command::invoke(function, args))
    }

    /// Health check
    pub fn ping(&mut self) -> Result<bool> {
        let response = self.call(&Command::Ping)?;
        Ok(response.is_ok() && response.payload.as_deref() == Some(b"PONG".as_slice()))
    }

    fn call(&mut self, command: &Command) -> Result<Response> {
        write_command(&mut self.writer, command)?;
        read_response(&mut self.reader)
    }
}
