//! Axum router configuration for invoice endpoints.

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{
    create_invoice, get_invoice, list_invoices, update_invoice_status, InvoiceAppState,
};

/// Create the invoice API router.
///
/// # Routes
///
/// - `POST /` - Issue a lesson invoice (debits the mentee)
/// - `GET /` - List an account's invoices (`?account_id=&party=`)
/// - `GET /:id` - Fetch one invoice
/// - `PATCH /:id/status` - Settle or cancel a pending invoice
pub fn invoice_routes() -> Router<InvoiceAppState> {
    Router::new()
        .route("/", post(create_invoice).get(list_invoices))
        .route("/:id", get(get_invoice))
        .route("/:id/status", patch(update_invoice_status))
}
