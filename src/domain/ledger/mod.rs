//! Credit ledger primitives.
//!
//! The ledger mutates exactly one account's balance per operation. Both
//! operations require a strictly positive amount, and a debit that would
//! take the balance below zero fails without touching it. Implementations
//! of the `CreditLedger` port must serialize concurrent mutations on the
//! same account: two debits that each pass a balance check individually
//! must not both succeed when their sum exceeds the balance.

use thiserror::Error;

use crate::domain::foundation::{AccountId, Credits};

/// Errors raised by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Debit and credit amounts must be strictly positive.
    #[error("Ledger amount must be positive")]
    NonPositiveAmount,

    /// The account's balance cannot cover the requested debit.
    #[error("Insufficient balance on account {account_id}: requested {requested}, available {available}")]
    InsufficientBalance {
        account_id: AccountId,
        requested: i64,
        available: i64,
    },

    /// The target account does not exist.
    #[error("Account {0} not found")]
    AccountNotFound(AccountId),

    /// Storage failure outside the ledger's control.
    #[error("Ledger infrastructure error: {0}")]
    Infrastructure(String),
}

impl LedgerError {
    pub fn insufficient_balance(account_id: AccountId, requested: Credits, available: Credits) -> Self {
        LedgerError::InsufficientBalance {
            account_id,
            requested: requested.amount(),
            available: available.amount(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        LedgerError::Infrastructure(message.into())
    }
}

/// Outcome of an idempotent credit keyed by an external payment event id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditOutcome {
    /// The credit was applied; carries the new balance.
    Applied(Credits),

    /// The event id was seen before; the balance is unchanged.
    AlreadyApplied,
}

impl CreditOutcome {
    /// Returns true if this delivery actually moved the balance.
    pub fn was_applied(&self) -> bool {
        matches!(self, CreditOutcome::Applied(_))
    }
}
