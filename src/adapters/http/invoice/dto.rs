//! HTTP DTOs for invoice endpoints.

use crate::domain::foundation::{AccountId, InvoiceId, Timestamp};
use crate::domain::invoice::{Invoice, InvoiceStatus};
use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to issue a lesson invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoiceRequest {
    pub mentor_id: AccountId,
    pub mentee_id: AccountId,
    /// Lesson cost in credits.
    pub amount: i64,
    pub due_date: Timestamp,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request to settle or cancel a pending invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInvoiceStatusRequest {
    pub status: InvoiceStatus,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
}

/// Which side of an invoice listing to return.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyParam {
    Mentor,
    Mentee,
}

/// Query parameters for invoice listings.
#[derive(Debug, Clone, Deserialize)]
pub struct ListInvoicesParams {
    pub account_id: AccountId,
    pub party: PartyParam,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Invoice representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceResponse {
    pub id: InvoiceId,
    pub mentor_id: AccountId,
    pub mentee_id: AccountId,
    pub amount: i64,
    pub description: Option<String>,
    pub status: InvoiceStatus,
    pub cancellation_reason: Option<String>,
    pub due_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id,
            mentor_id: invoice.mentor_id,
            mentee_id: invoice.mentee_id,
            amount: invoice.amount.amount(),
            description: invoice.description,
            status: invoice.status,
            cancellation_reason: invoice.cancellation_reason,
            due_date: invoice.due_date,
            created_at: invoice.created_at,
            updated_at: invoice.updated_at,
        }
    }
}

/// Response for invoice creation: the invoice plus the mentee's balance
/// after the debit.
#[derive(Debug, Clone, Serialize)]
pub struct CreateInvoiceResponse {
    pub invoice: InvoiceResponse,
    pub mentee_balance: i64,
}

/// Response for a status update: the invoice plus the mentor's balance
/// after the credit, when the invoice was paid.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateInvoiceStatusResponse {
    pub invoice: InvoiceResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentor_balance: Option<i64>,
}

/// Response for invoice listings.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceListResponse {
    pub invoices: Vec<InvoiceResponse>,
}
