//! # GroupLedger
//!
//! A request-routed group record manager with:
//! - Named operations dispatched from a function name + string arguments
//! - Streaming range-scan aggregation into a single JSON array
//! - In-memory and durable (append-only log) record stores
//! - TCP-based hosting protocol and CLI client
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │                  (Multiple Clients)                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  INVOKE (function, args)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Contract                                │
//! │        getByKey │ create │ seed │ listAll                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────────┐
//!   │ RecordStore │ ───────► │ ResultAggregator │
//!   │ get/put/scan│   scan   │   (listAll)      │
//!   └──────┬──────┘          └──────────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │ Record Log  │
//!   │  (Durable)  │
//!   └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod aggregate;
pub mod log;
pub mod store;
pub mod contract;
pub mod protocol;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LedgerError, Result};
pub use config::Config;
pub use contract::{Contract, Operation};
pub use record::Record;
pub use store::{DurableStore, MemoryStore, RecordStore};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of GroupLedger
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
