//! HTTP DTOs for billing endpoints.

use serde::{Deserialize, Serialize};

use crate::ports::CheckoutSession;

/// Request to open a hosted checkout session for a credit pack.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCheckoutSessionRequest {
    /// Buyer's marketplace email.
    pub account_email: String,
    /// Pack size in credits. Must match a known pack.
    pub credits_amount: i64,
    /// Redirect target after a completed payment.
    pub success_url: String,
    /// Redirect target after an abandoned payment.
    pub cancel_url: String,
}

/// Checkout session returned to the client for redirection.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSessionResponse {
    pub id: String,
    pub url: String,
}

impl From<CheckoutSession> for CheckoutSessionResponse {
    fn from(session: CheckoutSession) -> Self {
        Self {
            id: session.id,
            url: session.url,
        }
    }
}

/// Acknowledgement body returned to the payment provider.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAckResponse {
    pub received: bool,
}
