//! Billing domain - credit purchases through the payment provider.

mod payment_event;
mod webhook_errors;
mod webhook_verifier;

pub use payment_event::{CreditPack, PaymentEvent, PaymentWebhookEvent};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{PaymentWebhookVerifier, SignatureHeader};

#[cfg(test)]
pub use webhook_verifier::compute_test_signature;
