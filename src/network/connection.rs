//! Connection Handler
//!
//! Handles individual client connections.

use std::io::{BufRead, BufReader, BufWriter, ErrorKind};
use std::net::TcpStream;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::contract::Contract;
use crate::error::{LedgerError, Result};
use crate::protocol::{read_command, write_response, Command, Response, Status};

/// How often an idle connection checks for server shutdown
const SHUTDOWN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Handles a single client connection
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Contract that serves invocations
    contract: Arc<Contract>,

    /// Peer address for logging
    peer_addr: String,

    /// Longest wait for the next request (`None` waits until shutdown)
    idle_timeout: Option<Duration>,

    /// Set by the server when it stops
    shutdown: Arc<AtomicBool>,
}

impl Connection {
    /// Create a new connection handler
    ///
    /// Sets up buffered I/O on cloned read/write handles
    pub fn new(stream: TcpStream, contract: Arc<Contract>, shutdown: Arc<AtomicBool>) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Accepted from a non-blocking listener
        stream.set_nonblocking(false)?;
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            contract,
            peer_addr,
            idle_timeout: None,
            shutdown,
        })
    }

    /// Configure connection timeouts (0 disables a timeout)
    ///
    /// The read timeout bounds both the idle wait for a request and the
    /// read of each request frame.
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        self.idle_timeout = (read_ms > 0).then(|| Duration::from_millis(read_ms));

        if write_ms > 0 {
            self.writer
                .get_ref()
                .set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }

        Ok(())
    }

    /// Handle the connection (blocking until closed)
    ///
    /// Reads commands in a loop and sends responses.
    /// Returns when the client disconnects or an error occurs.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        loop {
            if !self.wait_for_request()? {
                return Ok(());
            }

            let command = match read_command(&mut self.reader) {
                Ok(cmd) => cmd,
                Err(LedgerError::Io(ref e)) if is_disconnect(e.kind()) => {
                    tracing::debug!("Client {} disconnected ({:?})", self.peer_addr, e.kind());
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                    let _ = self.send_response(Response::error(Status::Error, &e.to_string()));
                    return Err(e);
                }
            };

            tracing::trace!("Received command from {}: {:?}", self.peer_addr, command);

            let response = self.execute_command(command);

            if let Err(e) = self.send_response(response) {
                if let LedgerError::Io(ref io_err) = e {
                    if is_disconnect(io_err.kind()) {
                        tracing::debug!(
                            "Client {} disconnected before response could be sent: {}",
                            self.peer_addr,
                            e
                        );
                        return Ok(());
                    }
                }
                tracing::warn!("Error writing to {}: {}", self.peer_addr, e);
                return Err(e);
            }
        }
    }

    /// Block until request bytes are buffered
    ///
    /// Returns `false` when the connection should close instead: the peer
    /// hung up, the idle timeout passed, or the server is shutting down.
    /// Nothing is consumed from the stream while waiting, so a request that
    /// arrives in pieces is still read whole.
    fn wait_for_request(&mut self) -> Result<bool> {
        self.reader.get_ref().set_read_timeout(Some(SHUTDOWN_POLL_INTERVAL))?;
        let idle_since = Instant::now();

        let ready = loop {
            if self.shutdown.load(Ordering::Relaxed) {
                tracing::debug!("Closing {} for shutdown", self.peer_addr);
                return Ok(false);
            }

            match self.reader.fill_buf().map(|buf| !buf.is_empty()) {
                Ok(ready) => break ready,
                Err(ref e) if is_poll_expiry(e.kind()) => {
                    if self.idle_timeout.map_or(false, |limit| idle_since.elapsed() >= limit) {
                        tracing::debug!("Client {} idle, closing", self.peer_addr);
                        return Ok(false);
                    }
                }
                Err(e) if is_disconnect(e.kind()) => {
                    tracing::debug!("Client {} disconnected ({:?})", self.peer_addr, e.kind());
                    return Ok(false);
                }
                Err(e) => return Err(e.into()),
            }
        };

        if !ready {
            tracing::debug!("Client {} disconnected", self.peer_addr);
            return Ok(false);
        }

        self.reader.get_ref().set_read_timeout(self.idle_timeout)?;
        Ok(true)
    }

    /// Execute a command and return a response
    fn execute_command(&self, command: Command) -> Response {
        match command {
            Command::Invoke { function, args } => {
                let result = self.contract.invoke(&function, &args);
                if let Err(ref e) = result {
                    tracing::debug!("{} from {} failed: {}", function, self.peer_addr, e);
                }
                Response::from_result(result)
            }
            Command::Ping => Response::ok(Some(b"PONG".to_vec())),
        }
    }

    /// Send a response to the client
    fn send_response(&mut self, response: Response) -> Result<()> {
        write_response(&mut self.writer, &response)
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

/// Errors a poll-interval read returns when no bytes arrived
fn is_poll_expiry(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted)
}

/// Errors that mean the peer went away (or idled out) rather than a fault
fn is_disconnect(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::UnexpectedEof
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::BrokenPipe
            | ErrorKind::WouldBlock
            | ErrorKind::TimedOut
    )
}
