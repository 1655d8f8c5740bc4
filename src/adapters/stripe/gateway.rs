//! Stripe implementation of the CheckoutGateway port.
//!
//! Talks to the Stripe REST API over HTTPS for checkout sessions and
//! delegates webhook authentication to the domain verifier. API keys are
//! held as `secrecy::SecretString` so they never land in logs.

use crate::domain::billing::{
    CreditPack, PaymentWebhookEvent, PaymentWebhookVerifier, WebhookError,
};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{CheckoutGateway, CheckoutSession, CreateCheckoutRequest};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Configuration for the Stripe gateway.
pub struct StripeConfig {
    /// Secret API key.
    api_key: SecretString,
    /// Webhook signing secret.
    webhook_secret: SecretString,
    /// API base URL. Overridable for tests.
    api_base_url: String,
    /// Price id for the 25 credit pack.
    price_id_starter: String,
    /// Price id for the 200 credit pack.
    price_id_standard: String,
    /// Price id for the 500 credit pack.
    price_id_pro: String,
}

impl StripeConfig {
    pub fn new(
        api_key: impl Into<String>,
        webhook_secret: impl Into<String>,
        price_id_starter: impl Into<String>,
        price_id_standard: impl Into<String>,
        price_id_pro: impl Into<String>,
    ) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            webhook_secret: SecretString::new(webhook_secret.into()),
            api_base_url: "https://api.stripe.com".to_string(),
            price_id_starter: price_id_starter.into(),
            price_id_standard: price_id_standard.into(),
            price_id_pro: price_id_pro.into(),
        }
    }

    /// Overrides the API base URL (for tests against a local stub).
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    fn price_id(&self, pack: CreditPack) -> &str {
        match pack {
            CreditPack::Starter => &self.price_id_starter,
            CreditPack::Standard => &self.price_id_standard,
            CreditPack::Pro => &self.price_id_pro,
        }
    }
}

/// Raw checkout session payload from the Stripe API.
#[derive(Debug, Deserialize)]
struct StripeCheckoutSession {
    id: String,
    url: Option<String>,
}

/// Stripe implementation of the CheckoutGateway port.
pub struct StripeGateway {
    config: StripeConfig,
    verifier: PaymentWebhookVerifier,
    http_client: reqwest::Client,
}

impl StripeGateway {
    pub fn new(config: StripeConfig) -> Self {
        let verifier = PaymentWebhookVerifier::new(config.webhook_secret.expose_secret());
        Self {
            config,
            verifier,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CheckoutGateway for StripeGateway {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, DomainError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);
        let credits = request.pack.credits().amount().to_string();

        let params = vec![
            ("mode", "payment".to_string()),
            ("customer_email", request.account_email.clone()),
            ("line_items[0][price]", self.config.price_id(request.pack).to_string()),
            ("line_items[0][quantity]", "1".to_string()),
            ("success_url", request.success_url),
            ("cancel_url", request.cancel_url),
            // Echoed back in the webhook; the ingester resolves the
            // buyer and the credit amount from these two fields.
            ("metadata[app_email]", request.account_email),
            ("metadata[credits_amount]", credits),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Stripe request failed: {}", e),
                )
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Stripe API error: {}", error_text),
            ));
        }

        let session: StripeCheckoutSession = response.json().await.map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to parse Stripe response: {}", e),
            )
        })?;

        let url = session
            .url
            .unwrap_or_else(|| format!("https://checkout.stripe.com/c/pay/{}", session.id));

        Ok(CheckoutSession {
            id: session.id,
            url,
        })
    }

    fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<PaymentWebhookEvent, WebhookError> {
        self.verifier.verify_and_parse(payload, signature)
    }
}
