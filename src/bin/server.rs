//! GroupLedger Server Binary
//!
//! Hosts the contract over TCP.

use std::sync::Arc;

use clap::Parser;
use groupledger::network::Server;
use groupledger::{Config, Contract, DurableStore, MemoryStore, RecordStore};
use tracing_subscriber::{fmt, EnvFilter};

/// GroupLedger Server
#[derive(Parser, Debug)]
#[command(name = "groupledger-server")]
#[command(about = "Request-routed group record manager")]
#[command(version)]
struct Args {
    /// Data directory for the record log
    #[arg(short, long, default_value = "./groupledger_data")]
    data_dir: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:7051")]
    listen: String,

    /// Connection worker threads
    #[arg(short, long, default_value = "8")]
    workers: usize,

    /// Connections allowed to wait for a free worker
    #[arg(short, long, default_value = "256")]
    max_connections: usize,

    /// Keep records in memory only (nothing written to disk)
    #[arg(long)]
    in_memory: bool,

    /// Write the example records before serving
    #[arg(long)]
    seed: bool,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,groupledger=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("GroupLedger Server v{}", groupledger::VERSION);
    tracing::info!("Listen address: {}", args.listen);

    let config = Config::builder()
        .data_dir(&args.data_dir)
        .listen_addr(&args.listen)
        .worker_threads(args.workers)
        .max_connections(args.max_connections)
        .build();

    let store: Arc<dyn RecordStore> = if args.in_memory {
        tracing::info!("Using in-memory store");
        Arc::new(MemoryStore::new())
    } else {
        tracing::info!("Data directory: {}", args.data_dir);
        match DurableStore::open(&config) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::error!("Failed to open store: {}", e);
                std::process::exit(1);
            }
        }
    };

    let contract = Arc::new(Contract::new(store));

    if args.seed {
        if let Err(e) = contract.seed(&[] as &[&str]) {
            tracing::error!("Seeding failed: {}", e);
            std::process::exit(1);
        }
    }

    let server = match Server::bind(config, contract) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
