//! Notifier port for outbound user email.
//!
//! Notifications fire after the owning transaction commits and are
//! fire-and-forget: a delivery failure is logged, never propagated back
//! into the workflow that triggered it.

use crate::domain::foundation::DomainError;
use async_trait::async_trait;

/// A user-facing notification to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The mentor's verification request was approved.
    VerificationApproved { email: String, name: String },

    /// The mentor's verification request was declined.
    VerificationDeclined {
        email: String,
        name: String,
        reason: String,
    },
}

impl Notification {
    /// Recipient address.
    pub fn recipient(&self) -> &str {
        match self {
            Notification::VerificationApproved { email, .. } => email,
            Notification::VerificationDeclined { email, .. } => email,
        }
    }
}

/// Port for notification delivery.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a notification.
    ///
    /// # Errors
    ///
    /// - `NotificationError` on delivery failure
    async fn send(&self, notification: Notification) -> Result<(), DomainError>;
}
