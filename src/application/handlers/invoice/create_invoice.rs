//! CreateInvoiceHandler - Command handler for issuing a lesson invoice.
//!
//! Issuing an invoice debits the mentee immediately. The invoice row and
//! the debit commit together through `InvoiceStore::insert_with_debit`,
//! so a failed debit leaves no invoice behind.

use std::sync::Arc;

use crate::domain::foundation::{AccountId, Credits, InvoiceId, Timestamp};
use crate::domain::invoice::{Invoice, InvoiceError};
use crate::ports::{AccountStore, InvoiceStore};

/// Command to issue a new lesson invoice.
#[derive(Debug, Clone)]
pub struct CreateInvoiceCommand {
    /// The mentor issuing the invoice.
    pub mentor_id: AccountId,
    /// The mentee being billed.
    pub mentee_id: AccountId,
    /// Lesson cost in credits.
    pub amount: i64,
    /// When the lesson is due.
    pub due_date: Timestamp,
    /// Optional lesson description.
    pub description: Option<String>,
}

/// Result of issuing an invoice.
#[derive(Debug, Clone)]
pub struct CreateInvoiceResult {
    /// The persisted pending invoice.
    pub invoice: Invoice,
    /// The mentee's balance after the debit.
    pub mentee_balance: Credits,
}

/// Handler for issuing lesson invoices.
pub struct CreateInvoiceHandler {
    invoice_store: Arc<dyn InvoiceStore>,
    account_store: Arc<dyn AccountStore>,
}

impl CreateInvoiceHandler {
    pub fn new(invoice_store: Arc<dyn InvoiceStore>, account_store: Arc<dyn AccountStore>) -> Self {
        Self {
            invoice_store,
            account_store,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateInvoiceCommand,
    ) -> Result<CreateInvoiceResult, InvoiceError> {
        let amount = Credits::positive(cmd.amount)
            .map_err(|e| InvoiceError::validation("amount", e.to_string()))?;

        // Both parties must exist before any money moves.
        self.require_account(cmd.mentor_id).await?;
        self.require_account(cmd.mentee_id).await?;

        let invoice = Invoice::create(
            InvoiceId::new(),
            cmd.mentor_id,
            cmd.mentee_id,
            amount,
            cmd.due_date,
            cmd.description,
        )?;

        let mentee_balance = self.invoice_store.insert_with_debit(&invoice).await?;

        tracing::info!(
            invoice_id = %invoice.id,
            mentor_id = %invoice.mentor_id,
            mentee_id = %invoice.mentee_id,
            amount = invoice.amount.amount(),
            "Invoice created, mentee debited"
        );

        Ok(CreateInvoiceResult {
            invoice,
            mentee_balance,
        })
    }

    async fn require_account(&self, id: AccountId) -> Result<(), InvoiceError> {
        self.account_store
            .find_by_id(id)
            .await
            .map_err(|e| InvoiceError::infrastructure(e.to_string()))?
            .map(|_| ())
            .ok_or(InvoiceError::AccountNotFound(id))
    }
}
