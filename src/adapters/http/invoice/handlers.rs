//! HTTP handlers for invoice endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::invoice::{
    CreateInvoiceCommand, CreateInvoiceHandler, GetInvoiceHandler, GetInvoiceQuery, InvoiceParty,
    ListInvoicesHandler, ListInvoicesQuery, UpdateInvoiceStatusCommand,
    UpdateInvoiceStatusHandler,
};
use crate::domain::foundation::InvoiceId;
use crate::domain::invoice::InvoiceError;
use crate::ports::{AccountStore, InvoiceStore};

use super::dto::{
    CreateInvoiceRequest, CreateInvoiceResponse, InvoiceListResponse, InvoiceResponse,
    ListInvoicesParams, PartyParam, UpdateInvoiceStatusRequest, UpdateInvoiceStatusResponse,
};

/// Shared state for invoice endpoints.
#[derive(Clone)]
pub struct InvoiceAppState {
    pub invoice_store: Arc<dyn InvoiceStore>,
    pub account_store: Arc<dyn AccountStore>,
}

impl InvoiceAppState {
    fn create_handler(&self) -> CreateInvoiceHandler {
        CreateInvoiceHandler::new(self.invoice_store.clone(), self.account_store.clone())
    }

    fn update_status_handler(&self) -> UpdateInvoiceStatusHandler {
        UpdateInvoiceStatusHandler::new(self.invoice_store.clone())
    }

    fn get_handler(&self) -> GetInvoiceHandler {
        GetInvoiceHandler::new(self.invoice_store.clone())
    }

    fn list_handler(&self) -> ListInvoicesHandler {
        ListInvoicesHandler::new(self.invoice_store.clone())
    }
}

/// POST /api/invoices - Issue a lesson invoice, debiting the mentee.
pub async fn create_invoice(
    State(state): State<InvoiceAppState>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<impl IntoResponse, InvoiceApiError> {
    let result = state
        .create_handler()
        .handle(CreateInvoiceCommand {
            mentor_id: request.mentor_id,
            mentee_id: request.mentee_id,
            amount: request.amount,
            due_date: request.due_date,
            description: request.description,
        })
        .await?;

    let response = CreateInvoiceResponse {
        invoice: InvoiceResponse::from(result.invoice),
        mentee_balance: result.mentee_balance.amount(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// PATCH /api/invoices/:id/status - Settle or cancel a pending invoice.
pub async fn update_invoice_status(
    State(state): State<InvoiceAppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateInvoiceStatusRequest>,
) -> Result<impl IntoResponse, InvoiceApiError> {
    let result = state
        .update_status_handler()
        .handle(UpdateInvoiceStatusCommand {
            invoice_id: InvoiceId::from_uuid(id),
            status: request.status,
            cancellation_reason: request.cancellation_reason,
        })
        .await?;

    let response = UpdateInvoiceStatusResponse {
        invoice: InvoiceResponse::from(result.invoice),
        mentor_balance: result.mentor_balance.map(|b| b.amount()),
    };
    Ok(Json(response))
}

/// GET /api/invoices/:id - Fetch one invoice.
pub async fn get_invoice(
    State(state): State<InvoiceAppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, InvoiceApiError> {
    let invoice = state
        .get_handler()
        .handle(GetInvoiceQuery {
            invoice_id: InvoiceId::from_uuid(id),
        })
        .await?;

    Ok(Json(InvoiceResponse::from(invoice)))
}

/// GET /api/invoices - List an account's invoices, newest first.
pub async fn list_invoices(
    State(state): State<InvoiceAppState>,
    Query(params): Query<ListInvoicesParams>,
) -> Result<impl IntoResponse, InvoiceApiError> {
    let party = match params.party {
        PartyParam::Mentor => InvoiceParty::Mentor,
        PartyParam::Mentee => InvoiceParty::Mentee,
    };
    let invoices = state
        .list_handler()
        .handle(ListInvoicesQuery {
            account_id: params.account_id,
            party,
        })
        .await?;

    Ok(Json(InvoiceListResponse {
        invoices: invoices.into_iter().map(InvoiceResponse::from).collect(),
    }))
}

/// Wrapper mapping invoice errors onto HTTP responses.
pub struct InvoiceApiError(InvoiceError);

impl From<InvoiceError> for InvoiceApiError {
    fn from(err: InvoiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for InvoiceApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code) = match &self.0 {
            InvoiceError::NotFound(_) => (StatusCode::NOT_FOUND, "INVOICE_NOT_FOUND"),
            InvoiceError::AccountNotFound(_) => (StatusCode::NOT_FOUND, "ACCOUNT_NOT_FOUND"),
            InvoiceError::InsufficientBalance { .. } => {
                (StatusCode::PAYMENT_REQUIRED, "INSUFFICIENT_BALANCE")
            }
            InvoiceError::InvalidTransition { .. } => {
                (StatusCode::CONFLICT, "INVALID_STATE_TRANSITION")
            }
            InvoiceError::ValidationFailed { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            InvoiceError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ErrorResponse::new(code, self.0.to_string());
        (status, Json(body)).into_response()
    }
}
