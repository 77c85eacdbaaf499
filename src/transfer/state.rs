//! Transfer saga states

use std::fmt;

/// States a transfer saga moves through.
///
/// ```text
/// VALIDATING → TRANSFERRING → COMMITTED
///      ↓             ↓
///    FAILED    COMPENSATING → FAILED
/// ```
///
/// Terminal states: `Committed`, `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferState {
    /// Idempotency and existence checks in progress; no mutation yet.
    Validating,
    /// Debit and credit dispatched concurrently.
    Transferring,
    /// Terminal: both legs applied, transaction id recorded.
    Committed,
    /// Exactly one leg applied; reversing it.
    Compensating,
    /// Terminal: transfer did not commit.
    Failed,
}

impl TransferState {
    /// Whether no further transition is possible.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferState::Committed | TransferState::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransferState::Validating => "VALIDATING",
            TransferState::Transferring => "TRANSFERRING",
            TransferState::Committed => "COMMITTED",
            TransferState::Compensating => "COMPENSATING",
            TransferState::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TransferState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(TransferState::Committed.is_terminal());
        assert!(TransferState::Failed.is_terminal());

        assert!(!TransferState::Validating.is_terminal());
        assert!(!TransferState::Transferring.is_terminal());
        assert!(!TransferState::Compensating.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(TransferState::Validating.to_string(), "VALIDATING");
        assert_eq!(TransferState::Committed.to_string(), "COMMITTED");
        assert_eq!(TransferState::Compensating.to_string(), "COMPENSATING");
    }
}
