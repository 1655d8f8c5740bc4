//! Credit ledger port.
//!
//! Defines the contract for atomic balance mutations. The ledger is the
//! only path that moves credits; no other port writes the balance column.
//!
//! # Design
//!
//! - **Single account per call**: Each operation mutates one balance
//! - **Serialized debits**: Concurrent debits on one account must not
//!   both succeed when their sum exceeds the balance
//! - **Idempotent credits**: `credit_once` applies at most once per
//!   external event id

use crate::domain::foundation::{AccountId, Credits, PaymentEventId};
use crate::domain::ledger::{CreditOutcome, LedgerError};
use async_trait::async_trait;

/// Port for atomic credit balance mutations.
#[async_trait]
pub trait CreditLedger: Send + Sync {
    /// Removes `amount` credits from the account's balance.
    ///
    /// Returns the new balance.
    ///
    /// # Errors
    ///
    /// - `NonPositiveAmount` if `amount` is zero
    /// - `InsufficientBalance` if the balance cannot cover the debit;
    ///   the balance is left untouched
    /// - `AccountNotFound` if the account does not exist
    async fn debit(&self, account_id: AccountId, amount: Credits) -> Result<Credits, LedgerError>;

    /// Adds `amount` credits to the account's balance.
    ///
    /// Returns the new balance.
    ///
    /// # Errors
    ///
    /// - `NonPositiveAmount` if `amount` is zero
    /// - `AccountNotFound` if the account does not exist
    async fn credit(&self, account_id: AccountId, amount: Credits) -> Result<Credits, LedgerError>;

    /// Adds `amount` credits at most once per `event_id`.
    ///
    /// The dedup marker and the balance update commit in the same atomic
    /// unit. A redelivered event id returns `AlreadyApplied` and leaves
    /// the balance unchanged.
    async fn credit_once(
        &self,
        account_id: AccountId,
        amount: Credits,
        event_id: &PaymentEventId,
    ) -> Result<CreditOutcome, LedgerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_ledger_is_object_safe() {
        fn _accepts_dyn(_ledger: &dyn CreditLedger) {}
    }
}
