//! Invoice-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound / AccountNotFound | 404 |
//! | InsufficientBalance | 402 |
//! | InvalidTransition | 409 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{AccountId, InvoiceId};
use crate::domain::ledger::LedgerError;

use super::InvoiceStatus;

/// Errors raised by the invoice workflow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvoiceError {
    /// The invoice does not exist.
    #[error("Invoice {0} not found")]
    NotFound(InvoiceId),

    /// The mentor or mentee account does not exist.
    #[error("Account {0} not found")]
    AccountNotFound(AccountId),

    /// The mentee's balance cannot cover the invoice amount.
    #[error("Insufficient balance on account {account_id}: requested {requested}, available {available}")]
    InsufficientBalance {
        account_id: AccountId,
        requested: i64,
        available: i64,
    },

    /// The invoice is in a terminal state and cannot transition.
    #[error("Invalid invoice transition from {from} to {to}")]
    InvalidTransition {
        from: InvoiceStatus,
        to: InvoiceStatus,
    },

    /// A request field failed validation.
    #[error("Validation failed on '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    /// Storage or transport failure.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl InvoiceError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        InvoiceError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        InvoiceError::Infrastructure(message.into())
    }
}

impl From<LedgerError> for InvoiceError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientBalance {
                account_id,
                requested,
                available,
            } => InvoiceError::InsufficientBalance {
                account_id,
                requested,
                available,
            },
            LedgerError::AccountNotFound(id) => InvoiceError::AccountNotFound(id),
            LedgerError::NonPositiveAmount => {
                InvoiceError::validation("amount", "must be positive")
            }
            LedgerError::Infrastructure(msg) => InvoiceError::Infrastructure(msg),
        }
    }
}
