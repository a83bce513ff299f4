//! TCP Server
//!
//! Accepts connections and dispatches them to worker threads.

use std::io::ErrorKind;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, TrySendError};

use crate::config::Config;
use crate::contract::Contract;
use crate::error::{LedgerError, Result};

use super::Connection;

/// How long the accept loop sleeps when no connection is pending
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// TCP server hosting a contract
///
/// ## Threading
/// - The thread calling [`Server::run`] accepts connections
/// - `worker_threads` workers pull accepted streams off a bounded channel
/// - When the channel is full the connection is dropped with a warning
pub struct Server {
    config: Config,
    contract: Arc<Contract>,
    listener: TcpListener,
    shutdown: Arc<AtomicBool>,
}

impl Server {
    /// Bind the listen address from `config`
    pub fn bind(config: Config, contract: Arc<Contract>) -> Result<Self> {
        config.validate()?;

        let listener = TcpListener::bind(&config.listen_addr).map_err(|e| {
            LedgerError::Network(format!("Failed to bind {}: {}", config.listen_addr, e))
        })?;
        listener.set_nonblocking(true)?;

        Ok(Self {
            config,
            contract,
            listener,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Signal the server to shutdown gracefully
    ///
    /// Idle connections close within one poll interval; a request already
    /// executing is answered first.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Accept connections until shutdown is signalled (blocking)
    ///
    /// Waits for workers to close their connections before returning.
    pub fn run(&self) -> Result<()> {
        tracing::info!("Listening on {}", self.local_addr()?);

        let (sender, receiver) = channel::bounded::<TcpStream>(self.config.max_connections);
        let workers: Vec<JoinHandle<()>> = (0..self.config.worker_threads)
            .map(|id| self.spawn_worker(id, receiver.clone()))
            .collect::<std::io::Result<_>>()?;
        drop(receiver);

        while !self.shutdown.load(Ordering::Relaxed) {
            match self.listener.accept() {
                Ok((stream, addr)) => match sender.try_send(stream) {
                    Ok(()) => tracing::trace!("Queued connection from {}", addr),
                    Err(TrySendError::Full(_)) => {
                        tracing::warn!("Connection queue full, dropping {}", addr);
                    }
                    Err(TrySendError::Disconnected(_)) => {
                        return Err(LedgerError::Network(
                            "All connection workers exited".to_string(),
                        ));
                    }
                },
                Err(ref e) if e.kind() == ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                }
                Err(e) => {
                    tracing::warn!("Accept failed: {}", e);
                }
            }
        }

        tracing::info!("Shutting down, waiting for {} workers", workers.len());
        drop(sender);
        for worker in workers {
            if worker.join().is_err() {
                tracing::error!("Connection worker panicked");
            }
        }

        Ok(())
    }

    fn spawn_worker(&self, id: usize, receiver: Receiver<TcpStream>) -> std::io::Result<JoinHandle<()>> {
        let contract = Arc::clone(&self.contract);
        let shutdown = Arc::clone(&self.shutdown);
        let read_ms = self.config.read_timeout_ms;
        let write_ms = self.config.write_timeout_ms;

        thread::Builder::new()
            .name(format!("groupledger-worker-{}", id))
            .spawn(move || {
                for stream in receiver.iter() {
                    let result = Connection::new(stream, Arc::clone(&contract), Arc::clone(&shutdown))
                        .and_then(|mut conn| {
                            conn.set_timeouts(read_ms, write_ms)?;
                            conn.handle()
                        });
                    if let Err(e) = result {
                        tracing::warn!("Connection ended with error: {}", e);
                    }
                }
            })
    }
}
