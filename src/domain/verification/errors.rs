//! Verification-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound / AccountNotFound | 404 |
//! | InvalidTransition | 409 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{AccountId, ValidationError, VerificationId};

use super::VerificationStatus;

/// Errors raised by the verification workflow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VerificationError {
    /// The verification request does not exist.
    #[error("Verification {0} not found")]
    NotFound(VerificationId),

    /// The account under review does not exist.
    #[error("Account {0} not found")]
    AccountNotFound(AccountId),

    /// The verification is already decided.
    #[error("Invalid verification transition from {from} to {to}")]
    InvalidTransition {
        from: VerificationStatus,
        to: VerificationStatus,
    },

    /// A submitted field failed validation.
    #[error("Validation failed on '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    /// Attachment upload failed.
    #[error("Attachment upload failed: {0}")]
    UploadFailed(String),

    /// Storage or transport failure.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl VerificationError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        VerificationError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        VerificationError::Infrastructure(message.into())
    }
}

impl From<ValidationError> for VerificationError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::OutOfRange { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        VerificationError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}
