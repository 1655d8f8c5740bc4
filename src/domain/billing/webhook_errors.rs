//! Webhook error types for payment provider webhook handling.

use thiserror::Error;

/// Errors that occur while authenticating and parsing a webhook delivery.
///
/// None of these imply any ledger mutation happened: verification fails
/// before any further action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// Webhook signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Webhook timestamp is outside the acceptable window (5 minutes).
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Event timestamp is in the future beyond clock skew tolerance.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Failed to parse the webhook payload or signature header.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Required metadata field missing from the checkout session.
    #[error("Missing metadata: {0}")]
    MissingMetadata(&'static str),
}
