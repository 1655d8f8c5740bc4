//! DeclineVerificationHandler - Command handler for declining a pending
//! verification.
//!
//! Declining records the reason, returns the account to `Unverified`,
//! and touches neither the account's profile fields nor its category
//! associations. The decline email fires after the commit.

use std::sync::Arc;

use crate::domain::foundation::VerificationId;
use crate::domain::verification::{Verification, VerificationError};
use crate::ports::{AccountStore, Notification, Notifier, VerificationStore};

/// Command to decline a verification request.
#[derive(Debug, Clone)]
pub struct DeclineVerificationCommand {
    pub verification_id: VerificationId,
    /// Reason shown to the mentor. Required.
    pub reason: String,
}

/// Handler for verification declines.
pub struct DeclineVerificationHandler {
    verification_store: Arc<dyn VerificationStore>,
    account_store: Arc<dyn AccountStore>,
    notifier: Arc<dyn Notifier>,
}

impl DeclineVerificationHandler {
    pub fn new(
        verification_store: Arc<dyn VerificationStore>,
        account_store: Arc<dyn AccountStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            verification_store,
            account_store,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: DeclineVerificationCommand,
    ) -> Result<Verification, VerificationError> {
        if cmd.reason.trim().is_empty() {
            return Err(VerificationError::validation(
                "reason",
                "a decline reason is required",
            ));
        }

        let mut verification = self
            .verification_store
            .find_by_id(cmd.verification_id)
            .await?
            .ok_or(VerificationError::NotFound(cmd.verification_id))?;

        let mut account = self
            .account_store
            .find_by_id(verification.account_id)
            .await
            .map_err(|e| VerificationError::infrastructure(e.to_string()))?
            .ok_or(VerificationError::AccountNotFound(verification.account_id))?;

        verification.decline(cmd.reason.clone())?;
        account.mark_unverified();

        self.verification_store
            .commit_decline(&verification, &account)
            .await?;

        tracing::info!(
            verification_id = %verification.id,
            account_id = %account.id,
            "Verification declined"
        );

        let notifier = self.notifier.clone();
        let notification = Notification::VerificationDeclined {
            email: account.email.clone(),
            name: account.name.clone(),
            reason: cmd.reason,
        };
        tokio::spawn(async move {
            if let Err(e) = notifier.send(notification).await {
                tracing::warn!(error = %e, "Failed to send decline notification");
            }
        });

        Ok(verification)
    }
}
