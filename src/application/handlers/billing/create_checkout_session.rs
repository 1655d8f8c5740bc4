//! CreateCheckoutSessionHandler - Command handler for opening a hosted
//! checkout session for a credit pack.

use std::sync::Arc;

use crate::domain::billing::CreditPack;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{AccountStore, CheckoutGateway, CheckoutSession, CreateCheckoutRequest};

/// Command to open a checkout session.
#[derive(Debug, Clone)]
pub struct CreateCheckoutSessionCommand {
    /// Buyer's marketplace email.
    pub account_email: String,
    /// Requested pack size in credits. Must match a known pack.
    pub credits_amount: i64,
    /// Redirect target after a completed payment.
    pub success_url: String,
    /// Redirect target after an abandoned payment.
    pub cancel_url: String,
}

/// Handler for checkout session creation.
pub struct CreateCheckoutSessionHandler {
    gateway: Arc<dyn CheckoutGateway>,
    account_store: Arc<dyn AccountStore>,
}

impl CreateCheckoutSessionHandler {
    pub fn new(gateway: Arc<dyn CheckoutGateway>, account_store: Arc<dyn AccountStore>) -> Self {
        Self {
            gateway,
            account_store,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutSessionCommand,
    ) -> Result<CheckoutSession, DomainError> {
        let account = self
            .account_store
            .find_by_email(&cmd.account_email)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::AccountNotFound,
                    format!("No account for {}", cmd.account_email),
                )
            })?;

        let pack = CreditPack::from_credits(cmd.credits_amount).ok_or_else(|| {
            DomainError::validation(
                "credits_amount",
                format!("no credit pack of {} credits", cmd.credits_amount),
            )
        })?;

        let session = self
            .gateway
            .create_checkout_session(CreateCheckoutRequest {
                account_email: account.email.clone(),
                pack,
                success_url: cmd.success_url,
                cancel_url: cmd.cancel_url,
            })
            .await?;

        tracing::info!(
            account_id = %account.id,
            session_id = %session.id,
            credits = cmd.credits_amount,
            "Checkout session created"
        );

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{account_with_balance, InMemoryAccountStore};
    use crate::domain::billing::{PaymentWebhookEvent, WebhookError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeGateway {
        requests: Mutex<Vec<CreateCheckoutRequest>>,
    }

    impl FakeGateway {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CheckoutGateway for FakeGateway {
        async fn create_checkout_session(
            &self,
            request: CreateCheckoutRequest,
        ) -> Result<CheckoutSession, DomainError> {
            self.requests.lock().unwrap().push(request);
            Ok(CheckoutSession {
                id: "cs_test_123".to_string(),
                url: "https://checkout.test/cs_test_123".to_string(),
            })
        }

        fn verify_webhook(
            &self,
            _payload: &[u8],
            _signature: &str,
        ) -> Result<PaymentWebhookEvent, WebhookError> {
            unreachable!("not used in these tests")
        }
    }

    fn cmd(email: &str, credits: i64) -> CreateCheckoutSessionCommand {
        CreateCheckoutSessionCommand {
            account_email: email.to_string(),
            credits_amount: credits,
            success_url: "https://app.test/credits/success".to_string(),
            cancel_url: "https://app.test/credits".to_string(),
        }
    }

    #[tokio::test]
    async fn opens_session_for_known_pack() {
        let buyer = account_with_balance("buyer@example.com", 0);
        let account_store = Arc::new(InMemoryAccountStore::with_accounts(vec![buyer]));
        let gateway = Arc::new(FakeGateway::new());
        let handler = CreateCheckoutSessionHandler::new(gateway.clone(), account_store);

        let session = handler.handle(cmd("buyer@example.com", 200)).await.unwrap();

        assert_eq!(session.id, "cs_test_123");
        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].pack, CreditPack::Standard);
        assert_eq!(requests[0].account_email, "buyer@example.com");
    }

    #[tokio::test]
    async fn unknown_pack_size_is_rejected() {
        let buyer = account_with_balance("buyer@example.com", 0);
        let account_store = Arc::new(InMemoryAccountStore::with_accounts(vec![buyer]));
        let handler =
            CreateCheckoutSessionHandler::new(Arc::new(FakeGateway::new()), account_store);

        let result = handler.handle(cmd("buyer@example.com", 123)).await;

        assert_eq!(result.unwrap_err().code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn unknown_email_is_rejected() {
        let account_store = Arc::new(InMemoryAccountStore::with_accounts(vec![]));
        let handler =
            CreateCheckoutSessionHandler::new(Arc::new(FakeGateway::new()), account_store);

        let result = handler.handle(cmd("ghost@example.com", 25)).await;

        assert_eq!(result.unwrap_err().code, ErrorCode::AccountNotFound);
    }
}
