//! UpdateInvoiceStatusHandler - Command handler for settling or
//! cancelling a pending invoice.
//!
//! Marking an invoice paid credits the mentor in the same atomic unit
//! that persists the transition; a redelivered confirmation hits the
//! store's conditional update and fails with `InvalidTransition`, so the
//! mentor is credited exactly once. Cancelling moves no credits.

use std::sync::Arc;

use crate::domain::foundation::{Credits, InvoiceId};
use crate::domain::invoice::{Invoice, InvoiceError, InvoiceStatus};
use crate::ports::InvoiceStore;

/// Command to move a pending invoice into a terminal state.
#[derive(Debug, Clone)]
pub struct UpdateInvoiceStatusCommand {
    /// The invoice to update.
    pub invoice_id: InvoiceId,
    /// Target state. Only `Paid` and `Cancelled` are accepted.
    pub status: InvoiceStatus,
    /// Reason to record when cancelling.
    pub cancellation_reason: Option<String>,
}

/// Result of the status update.
#[derive(Debug, Clone)]
pub struct UpdateInvoiceStatusResult {
    /// The invoice in its new state.
    pub invoice: Invoice,
    /// The mentor's balance after the credit, when the invoice was paid.
    pub mentor_balance: Option<Credits>,
}

/// Handler for invoice status transitions.
pub struct UpdateInvoiceStatusHandler {
    invoice_store: Arc<dyn InvoiceStore>,
}

impl UpdateInvoiceStatusHandler {
    pub fn new(invoice_store: Arc<dyn InvoiceStore>) -> Self {
        Self { invoice_store }
    }

    pub async fn handle(
        &self,
        cmd: UpdateInvoiceStatusCommand,
    ) -> Result<UpdateInvoiceStatusResult, InvoiceError> {
        let mut invoice = self
            .invoice_store
            .find_by_id(cmd.invoice_id)
            .await?
            .ok_or(InvoiceError::NotFound(cmd.invoice_id))?;

        match cmd.status {
            InvoiceStatus::Paid => {
                invoice.mark_paid()?;
                let mentor_balance = self.invoice_store.mark_paid_with_credit(&invoice).await?;
                tracing::info!(
                    invoice_id = %invoice.id,
                    mentor_id = %invoice.mentor_id,
                    amount = invoice.amount.amount(),
                    "Invoice paid, mentor credited"
                );
                Ok(UpdateInvoiceStatusResult {
                    invoice,
                    mentor_balance: Some(mentor_balance),
                })
            }
            InvoiceStatus::Cancelled => {
                invoice.cancel(cmd.cancellation_reason)?;
                self.invoice_store.update_cancelled(&invoice).await?;
                tracing::info!(invoice_id = %invoice.id, "Invoice cancelled");
                Ok(UpdateInvoiceStatusResult {
                    invoice,
                    mentor_balance: None,
                })
            }
            InvoiceStatus::Pending => Err(InvoiceError::validation(
                "status",
                "an invoice cannot be moved back to pending",
            )),
        }
    }
}
