//! Transfer Coordinator
//!
//! Drives one transfer saga against the account ledger: idempotency check,
//! concurrent existence checks, concurrent debit+credit, compensation of
//! the successful leg on partial failure.

use std::collections::HashMap;
use std::sync::Mutex;

use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use crate::ledger::LedgerHandle;

use super::error::TransferError;
use super::state::TransferState;
use super::types::Transaction;

/// Which leg of a transfer succeeded while the other failed.
#[derive(Debug, Clone, Copy)]
enum CompletedLeg {
    Debit,
    Credit,
}

/// Orchestrates transfers as short sagas against the ledger.
///
/// Stateless per call apart from the committed-transaction set, which
/// exists purely for replay protection: only *successful* transfer ids are
/// recorded, so a failed id may be resubmitted unchanged.
pub struct TransferCoordinator {
    ledger: LedgerHandle,
    committed: Mutex<HashMap<String, Transaction>>,
}

impl TransferCoordinator {
    pub fn new(ledger: LedgerHandle) -> Self {
        Self {
            ledger,
            committed: Mutex::new(HashMap::new()),
        }
    }

    /// Run one transfer to a terminal outcome.
    ///
    /// The caller always gets a terminal result; compensation, when needed,
    /// runs on its own task after the failure has already been reported.
    pub async fn transfer(&self, txn: Transaction) -> Result<(), TransferError> {
        debug!(
            txn_id = %txn.transaction_id,
            state = %TransferState::Validating,
            "Transfer received: {} -> {}",
            txn.source_account_number,
            txn.target_account_number
        );

        self.validate(&txn)?;
        self.check_accounts(&txn).await?;
        self.move_funds(txn).await
    }

    /// Amount and idempotency checks; no ledger traffic yet.
    ///
    /// The replay guard is per *committed* id, not per in-flight id: the
    /// set is consulted here and only written after both legs land, so two
    /// concurrent submissions of the same fresh id can both pass this
    /// check and both execute. Callers that need stronger protection must
    /// not submit an id again until its first outcome is known.
    fn validate(&self, txn: &Transaction) -> Result<(), TransferError> {
        if txn.amount <= Decimal::ZERO {
            warn!(txn_id = %txn.transaction_id, amount = %txn.amount, "Transfer rejected: non-positive amount");
            return Err(TransferError::InvalidAmount);
        }

        let committed = self.committed.lock().expect("committed set lock poisoned");
        if committed.contains_key(&txn.transaction_id) {
            warn!(txn_id = %txn.transaction_id, "Transfer rejected: transaction id already committed");
            return Err(TransferError::DuplicateTransaction(
                txn.transaction_id.clone(),
            ));
        }
        Ok(())
    }

    /// Concurrent existence checks for both accounts.
    ///
    /// A timed-out lookup counts as absent: the saga must not proceed to
    /// mutation without a positive confirmation of both accounts. Source
    /// takes precedence in the reported reason when both are missing.
    async fn check_accounts(&self, txn: &Transaction) -> Result<(), TransferError> {
        let (source, target) = tokio::join!(
            self.ledger.get_account(&txn.source_account_number),
            self.ledger.get_account(&txn.target_account_number),
        );

        if !matches!(source, Ok(Some(_))) {
            warn!(
                txn_id = %txn.transaction_id,
                account = %txn.source_account_number,
                "Transfer failed: source account does not exist"
            );
            return Err(TransferError::SourceNotFound(
                txn.source_account_number.clone(),
            ));
        }
        if !matches!(target, Ok(Some(_))) {
            warn!(
                txn_id = %txn.transaction_id,
                account = %txn.target_account_number,
                "Transfer failed: target account does not exist"
            );
            return Err(TransferError::TargetNotFound(
                txn.target_account_number.clone(),
            ));
        }
        Ok(())
    }

    /// Dispatch both legs concurrently and settle the outcome.
    async fn move_funds(&self, txn: Transaction) -> Result<(), TransferError> {
        debug!(txn_id = %txn.transaction_id, state = %TransferState::Transferring, "Dispatching debit and credit");

        let (debit, credit) = tokio::join!(
            self.ledger.debit(&txn.source_account_number, txn.amount),
            self.ledger.credit(&txn.target_account_number, txn.amount),
        );

        match (debit.is_ok(), credit.is_ok()) {
            (true, true) => {
                let txn_id = txn.transaction_id.clone();
                self.committed
                    .lock()
                    .expect("committed set lock poisoned")
                    .insert(txn_id.clone(), txn.clone());
                info!(
                    txn_id = %txn_id,
                    state = %TransferState::Committed,
                    "Amount {} transferred from {} to {}",
                    txn.amount,
                    txn.source_account_number,
                    txn.target_account_number
                );
                Ok(())
            }
            (false, false) => {
                // Neither leg applied; nothing to compensate.
                error!(
                    txn_id = %txn.transaction_id,
                    state = %TransferState::Failed,
                    "Transfer failed: both legs rejected"
                );
                Err(TransferError::TransferFailed(txn.transaction_id))
            }
            (true, false) => {
                self.compensate(&txn, CompletedLeg::Debit);
                Err(TransferError::TransferFailed(txn.transaction_id))
            }
            (false, true) => {
                self.compensate(&txn, CompletedLeg::Credit);
                Err(TransferError::TransferFailed(txn.transaction_id))
            }
        }
    }

    /// Reverse the leg that did apply, restoring the pre-transfer balances.
    ///
    /// Fire-and-forget relative to the original caller: the failure reply
    /// goes out immediately and only the log records the corrective
    /// operation's own outcome.
    fn compensate(&self, txn: &Transaction, completed: CompletedLeg) {
        warn!(
            txn_id = %txn.transaction_id,
            state = %TransferState::Compensating,
            leg = ?completed,
            "Transfer failed: reversing the completed leg"
        );

        let ledger = self.ledger.clone();
        let txn = txn.clone();
        tokio::spawn(async move {
            let result = match completed {
                // Debit went through, credit did not: restore the source.
                CompletedLeg::Debit => ledger
                    .credit(&txn.source_account_number, txn.amount)
                    .await
                    .map(|_| ()),
                // Credit went through, debit did not: take it back off the
                // target. Uses the reversal op, not a business debit, so
                // restoring a pre-transfer balance of exactly 0 succeeds.
                CompletedLeg::Credit => ledger
                    .reverse_credit(&txn.target_account_number, txn.amount)
                    .await
                    .map(|_| ()),
            };

            match result {
                Ok(()) => info!(
                    txn_id = %txn.transaction_id,
                    state = %TransferState::Failed,
                    "Compensation applied"
                ),
                Err(e) => error!(
                    txn_id = %txn.transaction_id,
                    error = %e,
                    "Compensation failed; balances need manual reconciliation"
                ),
            }
        });
    }

    /// Number of committed transfers recorded so far.
    pub fn committed_count(&self) -> usize {
        self.committed
            .lock()
            .expect("committed set lock poisoned")
            .len()
    }

    /// Committed transaction for `transaction_id`, if any.
    pub fn committed_transaction(&self, transaction_id: &str) -> Option<Transaction> {
        self.committed
            .lock()
            .expect("committed set lock poisoned")
            .get(transaction_id)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use crate::ledger::Account;
    use rust_decimal_macros::dec;

    fn coordinator() -> (TransferCoordinator, LedgerHandle) {
        let ledger = LedgerHandle::spawn(&LedgerConfig {
            queue_size: 16,
            request_timeout_ms: 1000,
        });
        (TransferCoordinator::new(ledger.clone()), ledger)
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        let (coordinator, _ledger) = coordinator();

        let result = coordinator
            .transfer(Transaction::new("1", "11", "22", dec!(0)))
            .await;
        assert_eq!(result, Err(TransferError::InvalidAmount));

        let result = coordinator
            .transfer(Transaction::new("1", "11", "22", dec!(-3)))
            .await;
        assert_eq!(result, Err(TransferError::InvalidAmount));
    }

    #[tokio::test]
    async fn test_source_not_found_takes_precedence() {
        let (coordinator, _ledger) = coordinator();

        // neither account exists; the reason must name the source
        let result = coordinator
            .transfer(Transaction::new("1", "11", "22", dec!(2)))
            .await;
        assert_eq!(result, Err(TransferError::SourceNotFound("11".into())));
    }

    #[tokio::test]
    async fn test_failed_id_may_be_retried() {
        let (coordinator, ledger) = coordinator();

        ledger
            .create_account(Account::new("11", "src", dec!(10)))
            .await
            .unwrap();

        // fails: target missing; the id must not be remembered
        let result = coordinator
            .transfer(Transaction::new("1", "11", "99", dec!(2)))
            .await;
        assert_eq!(result, Err(TransferError::TargetNotFound("99".into())));
        assert_eq!(coordinator.committed_count(), 0);

        // same id succeeds once the target exists
        ledger
            .create_account(Account::new("99", "dst", dec!(0)))
            .await
            .unwrap();
        coordinator
            .transfer(Transaction::new("1", "11", "99", dec!(2)))
            .await
            .unwrap();
        assert!(coordinator.committed_transaction("1").is_some());
    }
}
