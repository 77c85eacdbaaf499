//! Account Ledger
//!
//! Exclusive owner of all account state. The table lives inside a single
//! service task ([`service::LedgerService`]) fed by an mpsc queue; callers
//! go through the cloneable [`LedgerHandle`], which pairs every request
//! with a oneshot reply channel and a per-call timeout.
//!
//! # Guarantees
//!
//! - Operations are processed one at a time, so a credit/debit's
//!   read-modify-write never interleaves with another operation.
//! - Operations on the same account are observed in submission order;
//!   there is no ordering guarantee across different accounts.
//! - `balance >= MINIMUM_BALANCE` holds after every committed debit.

pub mod error;
pub mod handle;
pub mod messages;
pub mod models;
pub mod service;

pub use error::LedgerError;
pub use handle::LedgerHandle;
pub use messages::LedgerRequest;
pub use models::{Account, MINIMUM_BALANCE};
