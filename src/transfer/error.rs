//! Transfer error types

use thiserror::Error;

/// Saga-level failures reported to the transfer caller.
///
/// Ledger errors never surface here verbatim: the coordinator translates
/// them into one of these outcomes (a timed-out or rejected leg becomes
/// `TransferFailed`, a missing account becomes `SourceNotFound` /
/// `TargetNotFound`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("transaction {0} is already committed")]
    DuplicateTransaction(String),

    #[error("source account {0} does not exist")]
    SourceNotFound(String),

    #[error("target account {0} does not exist")]
    TargetNotFound(String),

    #[error("transaction {0} failed")]
    TransferFailed(String),

    #[error("amount must be greater than zero")]
    InvalidAmount,
}

impl TransferError {
    /// Stable error code for boundary-layer responses.
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::DuplicateTransaction(_) => "DUPLICATE_TRANSACTION",
            TransferError::SourceNotFound(_) => "SOURCE_NOT_FOUND",
            TransferError::TargetNotFound(_) => "TARGET_NOT_FOUND",
            TransferError::TransferFailed(_) => "TRANSFER_FAILED",
            TransferError::InvalidAmount => "INVALID_AMOUNT",
        }
    }
}
