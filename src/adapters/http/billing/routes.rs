//! Axum router configuration for billing endpoints.

use axum::{routing::post, Router};

use super::handlers::{create_checkout_session, handle_payment_webhook, BillingAppState};

/// Create the billing API router.
///
/// # Routes
///
/// - `POST /checkout-session` - Open a hosted checkout session
/// - `POST /webhook` - Inbound payment provider webhook
pub fn billing_routes() -> Router<BillingAppState> {
    Router::new()
        .route("/checkout-session", post(create_checkout_session))
        .route("/webhook", post(handle_payment_webhook))
}
