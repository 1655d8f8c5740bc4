//! Billing handlers - checkout sessions and webhook ingestion.

mod create_checkout_session;
mod handle_payment_webhook;

pub use create_checkout_session::{CreateCheckoutSessionCommand, CreateCheckoutSessionHandler};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
