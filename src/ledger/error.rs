//! Ledger error types

use thiserror::Error;

/// Errors produced by ledger operations.
///
/// `Timeout` and `Unavailable` are transport-level: they mean the service
/// did not answer, not that it rejected the operation. Callers that drive
/// sagas fold them into the failure of the leg that raised them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("account {0} already exists")]
    AlreadyExists(String),

    #[error("account {0} does not exist")]
    NotFound(String),

    #[error("account {0} does not have sufficient balance")]
    InsufficientFunds(String),

    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("ledger did not respond within the timeout")]
    Timeout,

    #[error("ledger service is not running")]
    Unavailable,
}
