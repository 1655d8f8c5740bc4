//! HTTP handlers for billing endpoints.
//!
//! The webhook endpoint reads the raw body bytes because the provider's
//! signature covers the payload exactly as delivered.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::billing::{
    CreateCheckoutSessionCommand, CreateCheckoutSessionHandler, HandlePaymentWebhookCommand,
    HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{AccountStore, CheckoutGateway, CreditLedger};

use super::dto::{CheckoutSessionResponse, CreateCheckoutSessionRequest, WebhookAckResponse};

/// Signature header set by the payment provider on webhook deliveries.
const SIGNATURE_HEADER: &str = "Stripe-Signature";

/// Shared state for billing endpoints.
#[derive(Clone)]
pub struct BillingAppState {
    pub gateway: Arc<dyn CheckoutGateway>,
    pub account_store: Arc<dyn AccountStore>,
    pub ledger: Arc<dyn CreditLedger>,
}

impl BillingAppState {
    fn checkout_handler(&self) -> CreateCheckoutSessionHandler {
        CreateCheckoutSessionHandler::new(self.gateway.clone(), self.account_store.clone())
    }

    fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(
            self.gateway.clone(),
            self.account_store.clone(),
            self.ledger.clone(),
        )
    }
}

/// POST /api/billing/checkout-session - Open a hosted checkout session.
pub async fn create_checkout_session(
    State(state): State<BillingAppState>,
    Json(request): Json<CreateCheckoutSessionRequest>,
) -> Result<impl IntoResponse, BillingApiError> {
    let session = state
        .checkout_handler()
        .handle(CreateCheckoutSessionCommand {
            account_email: request.account_email,
            credits_amount: request.credits_amount,
            success_url: request.success_url,
            cancel_url: request.cancel_url,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CheckoutSessionResponse::from(session)),
    ))
}

/// POST /api/billing/webhook - Inbound payment provider webhook.
///
/// Always returns 200 on successful processing, including redeliveries
/// and event types this system ignores, so the provider stops retrying.
pub async fn handle_payment_webhook(
    State(state): State<BillingAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, BillingApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            BillingApiError(DomainError::new(
                ErrorCode::InvalidSignature,
                "Missing signature header",
            ))
        })?
        .to_string();

    let result = state
        .webhook_handler()
        .handle(HandlePaymentWebhookCommand {
            payload: body.to_vec(),
            signature,
        })
        .await?;

    if let HandlePaymentWebhookResult::Ignored { event_type } = &result {
        tracing::debug!(event_type = %event_type, "Acknowledged unhandled webhook event");
    }

    Ok(Json(WebhookAckResponse { received: true }))
}

/// Wrapper mapping billing errors onto HTTP responses.
pub struct BillingApiError(DomainError);

impl From<DomainError> for BillingApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for BillingApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0.code {
            ErrorCode::InvalidSignature => StatusCode::UNAUTHORIZED,
            ErrorCode::AccountNotFound
            | ErrorCode::InvoiceNotFound
            | ErrorCode::VerificationNotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
            ErrorCode::InsufficientBalance => StatusCode::PAYMENT_REQUIRED,
            ErrorCode::InvalidStateTransition => StatusCode::CONFLICT,
            ErrorCode::DatabaseError
            | ErrorCode::StorageError
            | ErrorCode::NotificationError
            | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse::new(self.0.code.to_string(), self.0.message.clone());
        (status, Json(body)).into_response()
    }
}
