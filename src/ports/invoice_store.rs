//! Invoice store port.
//!
//! Defines the contract for persisting Invoice aggregates together with
//! the ledger moves they imply. The money-moving methods name an atomic
//! unit: implementations commit the invoice row and the balance change
//! in one transaction, or neither.

use crate::domain::foundation::{AccountId, Credits, InvoiceId};
use crate::domain::invoice::{Invoice, InvoiceError};
use async_trait::async_trait;

/// Repository port for Invoice aggregate persistence.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert a new pending invoice and debit the mentee in one atomic
    /// unit.
    ///
    /// Returns the mentee's balance after the debit. If the debit fails,
    /// no invoice row exists.
    ///
    /// # Errors
    ///
    /// - `InsufficientBalance` if the mentee cannot cover the amount
    /// - `AccountNotFound` if the mentee does not exist
    async fn insert_with_debit(&self, invoice: &Invoice) -> Result<Credits, InvoiceError>;

    /// Persist the `Pending -> Paid` transition and credit the mentor in
    /// one atomic unit.
    ///
    /// The status update is conditional on the stored row still being
    /// pending, so two racing payment confirmations credit the mentor
    /// exactly once. Returns the mentor's balance after the credit.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if the stored invoice already left `Pending`
    /// - `NotFound` if the invoice does not exist
    async fn mark_paid_with_credit(&self, invoice: &Invoice) -> Result<Credits, InvoiceError>;

    /// Persist the `Pending -> Cancelled` transition.
    ///
    /// Conditional on the stored row still being pending, like
    /// `mark_paid_with_credit`. No balance moves.
    async fn update_cancelled(&self, invoice: &Invoice) -> Result<(), InvoiceError>;

    /// Find an invoice by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: InvoiceId) -> Result<Option<Invoice>, InvoiceError>;

    /// List invoices issued by a mentor, newest first.
    async fn list_by_mentor(&self, mentor_id: AccountId) -> Result<Vec<Invoice>, InvoiceError>;

    /// List invoices addressed to a mentee, newest first.
    async fn list_by_mentee(&self, mentee_id: AccountId) -> Result<Vec<Invoice>, InvoiceError>;
}
