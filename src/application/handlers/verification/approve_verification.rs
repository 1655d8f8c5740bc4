//! ApproveVerificationHandler - Command handler for approving a pending
//! verification.
//!
//! Approval is one atomic unit: the verification flips to `Approved`,
//! the submitted snapshot is promoted onto the account, the account
//! becomes `Verified`, and the snapshot's categories replace the
//! account's providing associations. The approval email fires after the
//! commit and never fails the request.

use std::sync::Arc;

use crate::domain::account::CategoryAssociation;
use crate::domain::foundation::VerificationId;
use crate::domain::verification::{Verification, VerificationError};
use crate::ports::{AccountStore, Notification, Notifier, VerificationStore};

/// Command to approve a verification request.
#[derive(Debug, Clone)]
pub struct ApproveVerificationCommand {
    pub verification_id: VerificationId,
}

/// Handler for verification approvals.
pub struct ApproveVerificationHandler {
    verification_store: Arc<dyn VerificationStore>,
    account_store: Arc<dyn AccountStore>,
    notifier: Arc<dyn Notifier>,
}

impl ApproveVerificationHandler {
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
        cmd: ApproveVerificationCommand,
    ) -> Result<Verification, VerificationError> {
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

        verification.approve()?;
        account.promote_verified_profile(verification.snapshot.to_profile());

        let providing: Vec<CategoryAssociation> = verification
            .snapshot
            .categories
            .iter()
            .map(|category| CategoryAssociation::providing(account.id, *category))
            .collect();

        self.verification_store
            .commit_approval(&verification, &account, &providing)
            .await?;

        tracing::info!(
            verification_id = %verification.id,
            account_id = %account.id,
            categories = providing.len(),
            "Verification approved"
        );

        let notifier = self.notifier.clone();
        let notification = Notification::VerificationApproved {
            email: account.email.clone(),
            name: account.name.clone(),
        };
        tokio::spawn(async move {
            if let Err(e) = notifier.send(notification).await {
                tracing::warn!(error = %e, "Failed to send approval notification");
            }
        });

        Ok(verification)
    }
}
