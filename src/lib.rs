//! bankcore - In-memory account ledger with saga-based transfers
//!
//! Per-account monetary balances plus multi-account transfers that appear
//! atomic to callers even though they are two independent mutations.
//!
//! # Modules
//!
//! - [`ledger`] - single-owner account table behind an mpsc request queue
//! - [`transfer`] - saga coordinator (existence checks, concurrent legs,
//!   compensation, idempotency record)
//! - [`config`] - YAML application config
//! - [`logging`] - tracing subscriber setup
//!
//! # Architecture
//!
//! ```text
//! caller ──▶ TransferCoordinator ──▶ LedgerHandle ──mpsc──▶ LedgerService
//!                  │                                        (owns table)
//!                  └── committed-transaction set
//! ```
//!
//! The ledger never calls back into the coordinator; dependency order is
//! strictly ledger (leaf), then transfer.

pub mod config;
pub mod ledger;
pub mod logging;
pub mod transfer;

// Convenient re-exports at crate root
pub use config::{AppConfig, LedgerConfig};
pub use ledger::{Account, LedgerError, LedgerHandle, MINIMUM_BALANCE};
pub use transfer::{Transaction, TransferCoordinator, TransferError, TransferState};
