//! Ledger request messages
//!
//! Every request carries a `oneshot` reply sender, giving the mpsc queue a
//! request-response shape without the service ever holding a caller handle.

use rust_decimal::Decimal;
use tokio::sync::oneshot;

use super::error::LedgerError;
use super::models::Account;

/// A single operation submitted to the ledger service.
#[derive(Debug)]
pub enum LedgerRequest {
    CreateAccount {
        account: Account,
        reply: oneshot::Sender<Result<Account, LedgerError>>,
    },
    /// Read-only lookup. Not-found is `None`, never an error.
    GetAccount {
        account_number: String,
        reply: oneshot::Sender<Option<Account>>,
    },
    /// Add `amount` to the balance. Replies with the new balance.
    Credit {
        account_number: String,
        amount: Decimal,
        reply: oneshot::Sender<Result<Decimal, LedgerError>>,
    },
    /// Subtract `amount` from the balance. Replies with the new balance.
    Debit {
        account_number: String,
        amount: Decimal,
        reply: oneshot::Sender<Result<Decimal, LedgerError>>,
    },
    /// Take back a previously applied credit. Restores a balance that was
    /// already valid, so unlike `Debit` it is not subject to the
    /// minimum-balance floor; it only refuses to push the balance negative.
    ReverseCredit {
        account_number: String,
        amount: Decimal,
        reply: oneshot::Sender<Result<Decimal, LedgerError>>,
    },
}

impl LedgerRequest {
    /// Operation name for log lines.
    pub fn op_name(&self) -> &'static str {
        match self {
            LedgerRequest::CreateAccount { .. } => "CREATE_ACCOUNT",
            LedgerRequest::GetAccount { .. } => "GET_ACCOUNT",
            LedgerRequest::Credit { .. } => "CREDIT",
            LedgerRequest::Debit { .. } => "DEBIT",
            LedgerRequest::ReverseCredit { .. } => "REVERSE_CREDIT",
        }
    }
}
