//! GetInvoiceHandler - Query handler for a single invoice.

use std::sync::Arc;

use crate::domain::foundation::InvoiceId;
use crate::domain::invoice::{Invoice, InvoiceError};
use crate::ports::InvoiceStore;

/// Query for one invoice by id.
#[derive(Debug, Clone)]
pub struct GetInvoiceQuery {
    pub invoice_id: InvoiceId,
}

/// Handler for invoice lookups.
pub struct GetInvoiceHandler {
    invoice_store: Arc<dyn InvoiceStore>,
}

impl GetInvoiceHandler {
    pub fn new(invoice_store: Arc<dyn InvoiceStore>) -> Self {
        Self { invoice_store }
    }

    pub async fn handle(&self, query: GetInvoiceQuery) -> Result<Invoice, InvoiceError> {
        self.invoice_store
            .find_by_id(query.invoice_id)
            .await?
            .ok_or(InvoiceError::NotFound(query.invoice_id))
    }
}
