//! Ledger client handle
//!
//! Cloneable sender side of the ledger queue. Every call pairs the request
//! with a `oneshot` reply channel and bounds the wait with the configured
//! timeout; a timed-out call reports `LedgerError::Timeout` while the
//! service may still apply the mutation (the caller gave up, the ledger
//! did not).

use std::time::Duration;

use rust_decimal::Decimal;
use tokio::sync::{mpsc, oneshot};
use tokio::time;

use crate::config::LedgerConfig;

use super::error::LedgerError;
use super::messages::LedgerRequest;
use super::models::Account;
use super::service::LedgerService;

/// Client handle to the ledger service.
#[derive(Clone)]
pub struct LedgerHandle {
    tx: mpsc::Sender<LedgerRequest>,
    timeout: Duration,
}

impl LedgerHandle {
    /// Spawn the ledger service on its own task and return a handle to it.
    ///
    /// The service runs until every clone of the handle is dropped.
    pub fn spawn(config: &LedgerConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_size);
        tokio::spawn(LedgerService::new(rx).run());
        Self {
            tx,
            timeout: config.request_timeout(),
        }
    }

    pub async fn create_account(&self, account: Account) -> Result<Account, LedgerError> {
        self.request(|reply| LedgerRequest::CreateAccount { account, reply })
            .await?
    }

    /// Look up an account. `Ok(None)` means the account does not exist;
    /// only transport failures surface as errors.
    pub async fn get_account(&self, account_number: &str) -> Result<Option<Account>, LedgerError> {
        let account_number = account_number.to_string();
        self.request(|reply| LedgerRequest::GetAccount {
            account_number,
            reply,
        })
        .await
    }

    /// Credit `amount` to the account. Returns the new balance.
    pub async fn credit(&self, account_number: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        let account_number = account_number.to_string();
        self.request(|reply| LedgerRequest::Credit {
            account_number,
            amount,
            reply,
        })
        .await?
    }

    /// Debit `amount` from the account. Returns the new balance.
    pub async fn debit(&self, account_number: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        let account_number = account_number.to_string();
        self.request(|reply| LedgerRequest::Debit {
            account_number,
            amount,
            reply,
        })
        .await?
    }

    /// Take back a previously applied credit, exempt from the
    /// minimum-balance floor. Reserved for transfer compensation, which
    /// restores a balance that was already valid.
    pub(crate) async fn reverse_credit(
        &self,
        account_number: &str,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        let account_number = account_number.to_string();
        self.request(|reply| LedgerRequest::ReverseCredit {
            account_number,
            amount,
            reply,
        })
        .await?
    }

    /// Send one request and await its reply within the timeout.
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> LedgerRequest,
    ) -> Result<T, LedgerError> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.tx
            .send(build(reply_tx))
            .await
            .map_err(|_| LedgerError::Unavailable)?;

        match time::timeout(self.timeout, reply_rx).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err(LedgerError::Unavailable),
            Err(_) => Err(LedgerError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_config() -> LedgerConfig {
        LedgerConfig {
            queue_size: 16,
            request_timeout_ms: 1000,
        }
    }

    #[tokio::test]
    async fn test_create_credit_get() {
        let ledger = LedgerHandle::spawn(&test_config());

        ledger
            .create_account(Account::new("1", "T", dec!(10)))
            .await
            .unwrap();
        assert_eq!(ledger.credit("1", dec!(2)).await.unwrap(), dec!(12));

        let account = ledger.get_account("1").await.unwrap().unwrap();
        assert_eq!(account.balance, dec!(12));
    }

    #[tokio::test]
    async fn test_get_missing_account_is_none() {
        let ledger = LedgerHandle::spawn(&test_config());
        assert_eq!(ledger.get_account("404").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_debit_insufficient_funds() {
        let ledger = LedgerHandle::spawn(&test_config());

        ledger
            .create_account(Account::new("1", "T", dec!(10)))
            .await
            .unwrap();

        let err = ledger.debit("1", dec!(20)).await.unwrap_err();
        assert_eq!(err, LedgerError::InsufficientFunds("1".into()));

        let account = ledger.get_account("1").await.unwrap().unwrap();
        assert_eq!(account.balance, dec!(10));
    }

    #[tokio::test]
    async fn test_concurrent_credits_are_serialized() {
        let ledger = LedgerHandle::spawn(&test_config());

        ledger
            .create_account(Account::new("1", "T", dec!(0.5)))
            .await
            .unwrap();

        let mut tasks = Vec::new();
        for _ in 0..50 {
            let ledger = ledger.clone();
            tasks.push(tokio::spawn(async move {
                ledger.credit("1", dec!(1)).await.unwrap()
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let account = ledger.get_account("1").await.unwrap().unwrap();
        assert_eq!(account.balance, dec!(50.5));
    }
}
