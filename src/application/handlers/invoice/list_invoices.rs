//! ListInvoicesHandler - Query handler for an account's invoices.

use std::sync::Arc;

use crate::domain::foundation::AccountId;
use crate::domain::invoice::{Invoice, InvoiceError};
use crate::ports::InvoiceStore;

/// Which side of the invoice the account is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceParty {
    /// Invoices the account issued.
    Mentor,
    /// Invoices the account was billed for.
    Mentee,
}

/// Query for an account's invoices, newest first.
#[derive(Debug, Clone)]
pub struct ListInvoicesQuery {
    pub account_id: AccountId,
    pub party: InvoiceParty,
}

/// Handler for invoice listings.
pub struct ListInvoicesHandler {
    invoice_store: Arc<dyn InvoiceStore>,
}

impl ListInvoicesHandler {
    pub fn new(invoice_store: Arc<dyn InvoiceStore>) -> Self {
        Self { invoice_store }
    }

    pub async fn handle(&self, query: ListInvoicesQuery) -> Result<Vec<Invoice>, InvoiceError> {
        match query.party {
            InvoiceParty::Mentor => self.invoice_store.list_by_mentor(query.account_id).await,
            InvoiceParty::Mentee => self.invoice_store.list_by_mentee(query.account_id).await,
        }
    }
}
