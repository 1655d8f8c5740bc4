//! Verification request aggregate entity.
//!
//! A verification freezes a mentor's submitted onboarding profile until an
//! admin decides it. The decision happens exactly once: `approve` and
//! `decline` both reject a request that has already left `Pending`.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, Timestamp, VerificationId};

use super::{VerificationError, VerificationSnapshot, VerificationStatus};

/// Mentor verification request aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    /// Unique identifier for this request.
    pub id: VerificationId,

    /// The account under review.
    pub account_id: AccountId,

    /// Current decision state.
    pub status: VerificationStatus,

    /// The submitted profile, frozen at submission time.
    pub snapshot: VerificationSnapshot,

    /// Reason supplied when the request was declined.
    pub decline_reason: Option<String>,

    /// When the request was submitted.
    pub created_at: Timestamp,

    /// When the request was last updated.
    pub updated_at: Timestamp,
}

impl Verification {
    /// Creates a new `Pending` verification from a validated snapshot.
    pub fn create(
        id: VerificationId,
        account_id: AccountId,
        snapshot: VerificationSnapshot,
    ) -> Result<Self, VerificationError> {
        snapshot.validate()?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            account_id,
            status: VerificationStatus::Pending,
            snapshot,
            decline_reason: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Transitions the request to `Approved`.
    ///
    /// The caller must promote the snapshot onto the account and resync
    /// its providing categories in the same atomic unit that persists
    /// this transition.
    pub fn approve(&mut self) -> Result<(), VerificationError> {
        self.guard_pending(VerificationStatus::Approved)?;
        self.status = VerificationStatus::Approved;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Transitions the request to `Declined`, recording the reason.
    pub fn decline(&mut self, reason: impl Into<String>) -> Result<(), VerificationError> {
        self.guard_pending(VerificationStatus::Declined)?;
        self.status = VerificationStatus::Declined;
        self.decline_reason = Some(reason.into());
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn guard_pending(&self, target: VerificationStatus) -> Result<(), VerificationError> {
        if self.status.is_terminal() {
            return Err(VerificationError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }
        Ok(())
    }
}
