//! ListVerificationsHandler - Query handler for the admin review queue.

use std::sync::Arc;

use crate::domain::foundation::AccountId;
use crate::domain::verification::{Verification, VerificationError, VerificationStatus};
use crate::ports::VerificationStore;

/// Query for verification requests, newest first.
///
/// With `account_id` set, lists that account's requests; otherwise the
/// whole queue. `status` narrows either listing.
#[derive(Debug, Clone, Default)]
pub struct ListVerificationsQuery {
    pub status: Option<VerificationStatus>,
    pub account_id: Option<AccountId>,
}

/// Handler for verification listings.
pub struct ListVerificationsHandler {
    verification_store: Arc<dyn VerificationStore>,
}

impl ListVerificationsHandler {
    pub fn new(verification_store: Arc<dyn VerificationStore>) -> Self {
        Self { verification_store }
    }

    pub async fn handle(
        &self,
        query: ListVerificationsQuery,
    ) -> Result<Vec<Verification>, VerificationError> {
        match query.account_id {
            Some(account_id) => {
                let mut found = self.verification_store.list_by_account(account_id).await?;
                if let Some(status) = query.status {
                    found.retain(|v| v.status == status);
                }
                Ok(found)
            }
            None => self.verification_store.list(query.status).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        account_with_balance, InMemoryAccountStore, InMemoryVerificationStore,
    };
    use crate::domain::account::ServicePriceType;
    use crate::domain::foundation::{CategoryId, VerificationId};
    use crate::domain::verification::VerificationSnapshot;

    fn verification(account_id: AccountId) -> Verification {
        Verification::create(
            VerificationId::new(),
            account_id,
            VerificationSnapshot {
                id_card_photo: "https://files.test/id.jpg".to_string(),
                about_me_text: None,
                about_me_video_link: None,
                cv_link: None,
                service_price: None,
                service_price_type: ServicePriceType::PerLesson,
                categories: vec![CategoryId::new()],
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn filters_by_status_and_account() {
        let alice = account_with_balance("alice@example.com", 0);
        let bob = account_with_balance("bob@example.com", 0);
        let account_store = Arc::new(InMemoryAccountStore::with_accounts(vec![
            alice.clone(),
            bob.clone(),
        ]));
        let store = Arc::new(InMemoryVerificationStore::new(account_store));

        let pending = verification(alice.id);
        let mut approved = verification(bob.id);
        approved.approve().unwrap();
        store.seed(pending.clone());
        store.seed(approved.clone());

        let handler = ListVerificationsHandler::new(store);

        let all = handler.handle(ListVerificationsQuery::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let only_pending = handler
            .handle(ListVerificationsQuery {
                status: Some(VerificationStatus::Pending),
                account_id: None,
            })
            .await
            .unwrap();
        assert_eq!(only_pending, vec![pending.clone()]);

        let bobs = handler
            .handle(ListVerificationsQuery {
                status: None,
                account_id: Some(bob.id),
            })
            .await
            .unwrap();
        assert_eq!(bobs, vec![approved]);

        let bobs_pending = handler
            .handle(ListVerificationsQuery {
                status: Some(VerificationStatus::Pending),
                account_id: Some(bob.id),
            })
            .await
            .unwrap();
        assert!(bobs_pending.is_empty());
    }
}
