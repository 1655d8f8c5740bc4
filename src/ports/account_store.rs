//! Account store port.
//!
//! Defines the contract for persisting and retrieving Account aggregates
//! and their category associations. Balance mutations go through the
//! `CreditLedger` port, never through `update` here.

use crate::domain::account::Account;
use crate::domain::foundation::{AccountId, CategoryId, DomainError};
use async_trait::async_trait;

/// Repository port for Account aggregate persistence.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Save a new account.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the email is already taken
    /// - `DatabaseError` on persistence failure
    async fn save(&self, account: &Account) -> Result<(), DomainError>;

    /// Update an existing account's profile and verification state.
    ///
    /// The stored balance is not written from the aggregate; the ledger
    /// owns that column.
    async fn update(&self, account: &Account) -> Result<(), DomainError>;

    /// Find an account by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, DomainError>;

    /// Find an account by email.
    ///
    /// Payment webhooks resolve the credited account through this lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// List the categories the account currently provides mentorship in.
    async fn providing_categories(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<CategoryId>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn AccountStore) {}
    }
}
