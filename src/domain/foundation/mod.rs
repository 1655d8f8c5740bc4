//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the marketplace domain.

mod credits;
mod errors;
mod ids;
mod timestamp;

pub use credits::Credits;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AccountId, CategoryId, InvoiceId, PaymentEventId, VerificationId};
pub use timestamp::Timestamp;
