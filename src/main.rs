//! bankcore demo binary
//!
//! Boots the stack (config -> logging -> ledger task -> coordinator) and
//! runs a short account/transfer sequence. The request-handling layer that
//! would normally sit in front of the coordinator is out of scope; this is
//! the bootstrapping that remains.

use anyhow::Context;
use rust_decimal::Decimal;
use tracing::info;

use bankcore::config::AppConfig;
use bankcore::ledger::{Account, LedgerHandle};
use bankcore::logging::init_logging;
use bankcore::transfer::{Transaction, TransferCoordinator};

fn get_env() -> String {
    std::env::args().nth(1).unwrap_or_else(|| "default".to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load_or_default(&get_env());
    let _guard = init_logging(&config);

    info!(
        queue_size = config.ledger.queue_size,
        timeout_ms = config.ledger.request_timeout_ms,
        "bankcore starting"
    );

    let ledger = LedgerHandle::spawn(&config.ledger);
    let coordinator = TransferCoordinator::new(ledger.clone());

    ledger
        .create_account(Account::new("11", "Alice", Decimal::from(100)))
        .await
        .context("creating account 11")?;
    ledger
        .create_account(Account::new("22", "Bob", Decimal::from(20)))
        .await
        .context("creating account 22")?;

    ledger.credit("22", Decimal::from(5)).await.context("crediting 22")?;

    coordinator
        .transfer(Transaction::new("txn-1", "11", "22", Decimal::from(30)))
        .await
        .context("transferring 30 from 11 to 22")?;

    for number in ["11", "22"] {
        if let Some(account) = ledger
            .get_account(number)
            .await
            .context("reading final balances")?
        {
            info!(account = %account.account_number, name = %account.name, balance = %account.balance, "Final balance");
        }
    }

    Ok(())
}
