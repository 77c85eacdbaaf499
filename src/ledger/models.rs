//! Account data model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lowest balance any account may be left with after a debit.
pub const MINIMUM_BALANCE: Decimal = Decimal::ZERO;

/// A single account as held by the ledger.
///
/// Accounts are immutable values: the ledger replaces the stored `Account`
/// on every credit/debit rather than editing it in place, so a fetched copy
/// never observes a later mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub account_number: String,
    pub name: String,
    pub balance: Decimal,
}

impl Account {
    pub fn new(
        account_number: impl Into<String>,
        name: impl Into<String>,
        balance: Decimal,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            name: name.into(),
            balance,
        }
    }

    /// Copy of this account with a new balance.
    pub fn with_balance(&self, balance: Decimal) -> Self {
        Self {
            account_number: self.account_number.clone(),
            name: self.name.clone(),
            balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_with_balance_keeps_identity() {
        let account = Account::new("001", "Alice", dec!(10));
        let updated = account.with_balance(dec!(12));

        assert_eq!(updated.account_number, "001");
        assert_eq!(updated.name, "Alice");
        assert_eq!(updated.balance, dec!(12));
        // original copy untouched
        assert_eq!(account.balance, dec!(10));
    }
}
