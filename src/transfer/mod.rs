//! Transfer saga
//!
//! Executes multi-account transfers that must look atomic even though they
//! are two independent ledger mutations (a debit and a credit). No
//! cross-account lock exists; atomicity is approximated with existence
//! pre-checks, an idempotency record of committed ids, and compensation of
//! the successful leg when the other one fails.
//!
//! # State machine
//!
//! ```text
//! VALIDATING → TRANSFERRING → COMMITTED
//!      ↓             ↓
//!    FAILED    COMPENSATING → FAILED
//! ```
//!
//! # Invariants
//!
//! 1. No ledger mutation before both existence checks pass.
//! 2. Only committed transaction ids are deduplicated; a failed id may be
//!    resubmitted unchanged.
//! 3. Compensation reverses the leg that applied, so a failed transfer
//!    leaves both balances at their pre-transfer values.
//! 4. The caller always receives a terminal outcome; compensation runs
//!    after the reply, never blocking it.

pub mod coordinator;
pub mod error;
pub mod state;
pub mod types;


pub use coordinator::TransferCoordinator;
pub use error::TransferError;
pub use state::TransferState;
pub use types::Transaction;
