//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Stripe API key
    pub stripe_api_key: String,

    /// Stripe webhook signing secret
    pub stripe_webhook_secret: String,

    /// Stripe price ID for the starter credit pack
    pub stripe_starter_price_id: String,

    /// Stripe price ID for the standard credit pack
    pub stripe_standard_price_id: String,

    /// Stripe price ID for the pro credit pack
    pub stripe_pro_price_id: String,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.starts_with("sk_test_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_API_KEY"));
        }
        if self.stripe_webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_WEBHOOK_SECRET"));
        }
        if self.stripe_starter_price_id.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_STARTER_PRICE_ID"));
        }
        if self.stripe_standard_price_id.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_STANDARD_PRICE_ID"));
        }
        if self.stripe_pro_price_id.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_PRO_PRICE_ID"));
        }

        // Verify key prefixes for safety
        if !self.stripe_api_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !self.stripe_webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        Ok(())
    }
}
