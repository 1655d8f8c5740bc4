//! Checkout gateway port for the payment provider.
//!
//! Covers the two touch points with the provider: opening a hosted
//! checkout session for a credit pack, and authenticating inbound
//! webhook deliveries.

use crate::domain::billing::{CreditPack, PaymentWebhookEvent, WebhookError};
use crate::domain::foundation::DomainError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Request to open a hosted checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Buyer's marketplace email, echoed back in webhook metadata.
    pub account_email: String,

    /// The credit pack being purchased.
    pub pack: CreditPack,

    /// Where the provider redirects after a completed payment.
    pub success_url: String,

    /// Where the provider redirects after an abandoned payment.
    pub cancel_url: String,
}

/// A hosted checkout session created at the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider-assigned session id.
    pub id: String,

    /// URL the buyer is sent to.
    pub url: String,
}

/// Port for payment provider integration.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Create a hosted checkout session for a credit pack.
    ///
    /// # Errors
    ///
    /// - `InternalError` on provider API failure
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, DomainError>;

    /// Verify a webhook delivery's signature and parse the event.
    ///
    /// Pure computation over the raw body and signature header; no
    /// provider round trip.
    fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<PaymentWebhookEvent, WebhookError>;
}
