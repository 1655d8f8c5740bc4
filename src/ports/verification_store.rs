//! Verification store port.
//!
//! Defines the contract for persisting Verification aggregates and for
//! the two decision commits. Each decision method names an atomic unit:
//! the verification row, the account row, and (on approval) the category
//! associations change together or not at all.

use crate::domain::account::{Account, CategoryAssociation};
use crate::domain::foundation::{AccountId, VerificationId};
use crate::domain::verification::{Verification, VerificationError, VerificationStatus};
use async_trait::async_trait;

/// Repository port for Verification aggregate persistence.
#[async_trait]
pub trait VerificationStore: Send + Sync {
    /// Insert a new pending verification and mark the account as
    /// awaiting review in one atomic unit.
    async fn insert_pending(
        &self,
        verification: &Verification,
        account: &Account,
    ) -> Result<(), VerificationError>;

    /// Find a verification by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: VerificationId)
        -> Result<Option<Verification>, VerificationError>;

    /// List verifications, optionally filtered by status, newest first.
    async fn list(
        &self,
        status: Option<VerificationStatus>,
    ) -> Result<Vec<Verification>, VerificationError>;

    /// List an account's verification requests, newest first.
    async fn list_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Verification>, VerificationError>;

    /// Commit an approval decision in one atomic unit.
    ///
    /// Persists the `Approved` verification, the account with its
    /// promoted profile and `Verified` status, and replaces the
    /// account's providing category associations with `providing`.
    /// Existing providing rows are removed first; seeking rows are
    /// untouched.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if the stored verification already left
    ///   `Pending`
    /// - `NotFound` if the verification does not exist
    async fn commit_approval(
        &self,
        verification: &Verification,
        account: &Account,
        providing: &[CategoryAssociation],
    ) -> Result<(), VerificationError>;

    /// Commit a decline decision in one atomic unit.
    ///
    /// Persists the `Declined` verification with its reason and the
    /// account back at `Unverified`. Profile fields and category
    /// associations are left untouched.
    async fn commit_decline(
        &self,
        verification: &Verification,
        account: &Account,
    ) -> Result<(), VerificationError>;
}
