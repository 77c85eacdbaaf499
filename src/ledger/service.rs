//! Ledger service loop
//!
//! A single task owns the account table and drains the request queue one
//! message at a time. That serialization is the whole concurrency story:
//! no read-modify-write on an account can interleave with another, and
//! operations on the same account are observed in queue order.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::error::LedgerError;
use super::messages::LedgerRequest;
use super::models::{Account, MINIMUM_BALANCE};

/// Exclusive owner of the account table.
///
/// Never constructed directly by callers; [`super::LedgerHandle::spawn`]
/// creates the service and runs it on its own task.
pub struct LedgerService {
    accounts: HashMap<String, Account>,
    rx: mpsc::Receiver<LedgerRequest>,
}

impl LedgerService {
    pub(super) fn new(rx: mpsc::Receiver<LedgerRequest>) -> Self {
        Self {
            accounts: HashMap::new(),
            rx,
        }
    }

    /// Process requests until every handle is dropped.
    pub(super) async fn run(mut self) {
        info!("Ledger service started");
        while let Some(request) = self.rx.recv().await {
            self.handle(request);
        }
        info!("Ledger service stopped (all handles dropped)");
    }

    fn handle(&mut self, request: LedgerRequest) {
        debug!(op = request.op_name(), "Ledger request");
        // Replies are best-effort: the caller may have timed out and
        // dropped its receiver, but the mutation has already been decided.
        match request {
            LedgerRequest::CreateAccount { account, reply } => {
                let _ = reply.send(self.create_account(account));
            }
            LedgerRequest::GetAccount {
                account_number,
                reply,
            } => {
                let _ = reply.send(self.accounts.get(&account_number).cloned());
            }
            LedgerRequest::Credit {
                account_number,
                amount,
                reply,
            } => {
                let _ = reply.send(self.credit(&account_number, amount));
            }
            LedgerRequest::Debit {
                account_number,
                amount,
                reply,
            } => {
                let _ = reply.send(self.debit(&account_number, amount));
            }
            LedgerRequest::ReverseCredit {
                account_number,
                amount,
                reply,
            } => {
                let _ = reply.send(self.reverse_credit(&account_number, amount));
            }
        }
    }

    fn create_account(&mut self, account: Account) -> Result<Account, LedgerError> {
        if self.accounts.contains_key(&account.account_number) {
            warn!(
                account = %account.account_number,
                "CREATE_ACCOUNT failed: account already exists"
            );
            return Err(LedgerError::AlreadyExists(account.account_number));
        }

        info!(account = %account.account_number, balance = %account.balance, "Account created");
        self.accounts
            .insert(account.account_number.clone(), account.clone());
        Ok(account)
    }

    fn credit(&mut self, account_number: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        if amount <= Decimal::ZERO {
            warn!(account = %account_number, %amount, "CREDIT failed: non-positive amount");
            return Err(LedgerError::InvalidAmount);
        }

        let account = self.accounts.get(account_number).ok_or_else(|| {
            warn!(account = %account_number, "CREDIT failed: account does not exist");
            LedgerError::NotFound(account_number.to_string())
        })?;

        let new_balance = account.balance + amount;
        let updated = account.with_balance(new_balance);
        self.accounts.insert(account_number.to_string(), updated);

        info!(account = %account_number, %amount, balance = %new_balance, "CREDIT succeeded");
        Ok(new_balance)
    }

    fn debit(&mut self, account_number: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        if amount <= Decimal::ZERO {
            warn!(account = %account_number, %amount, "DEBIT failed: non-positive amount");
            return Err(LedgerError::InvalidAmount);
        }

        let account = self.accounts.get(account_number).ok_or_else(|| {
            warn!(account = %account_number, "DEBIT failed: account does not exist");
            LedgerError::NotFound(account_number.to_string())
        })?;

        let new_balance = account.balance - amount;
        if new_balance <= MINIMUM_BALANCE {
            warn!(
                account = %account_number,
                %amount,
                balance = %account.balance,
                "DEBIT failed: insufficient balance"
            );
            return Err(LedgerError::InsufficientFunds(account_number.to_string()));
        }

        let updated = account.with_balance(new_balance);
        self.accounts.insert(account_number.to_string(), updated);

        info!(account = %account_number, %amount, balance = %new_balance, "DEBIT succeeded");
        Ok(new_balance)
    }

    /// Undo a credit that already landed. The balance being restored was
    /// valid before the credit, so the minimum-balance floor does not
    /// apply; only a balance that has since been spent below `amount`
    /// blocks the reversal.
    fn reverse_credit(
        &mut self,
        account_number: &str,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        if amount <= Decimal::ZERO {
            warn!(account = %account_number, %amount, "REVERSE_CREDIT failed: non-positive amount");
            return Err(LedgerError::InvalidAmount);
        }

        let account = self.accounts.get(account_number).ok_or_else(|| {
            warn!(account = %account_number, "REVERSE_CREDIT failed: account does not exist");
            LedgerError::NotFound(account_number.to_string())
        })?;

        let new_balance = account.balance - amount;
        if new_balance < Decimal::ZERO {
            warn!(
                account = %account_number,
                %amount,
                balance = %account.balance,
                "REVERSE_CREDIT failed: balance already spent"
            );
            return Err(LedgerError::InsufficientFunds(account_number.to_string()));
        }

        let updated = account.with_balance(new_balance);
        self.accounts.insert(account_number.to_string(), updated);

        info!(account = %account_number, %amount, balance = %new_balance, "REVERSE_CREDIT succeeded");
        Ok(new_balance)
    }
}
