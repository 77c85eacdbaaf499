//! Transfer data types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One requested funds movement between two accounts.
///
/// Immutable value. On success the coordinator records it in its
/// committed set under `transaction_id`; it is never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub source_account_number: String,
    pub target_account_number: String,
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(
        transaction_id: impl Into<String>,
        source_account_number: impl Into<String>,
        target_account_number: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            source_account_number: source_account_number.into(),
            target_account_number: target_account_number.into(),
            amount,
        }
    }
}
