//! Invoice workflow handlers.

mod create_invoice;
mod get_invoice;
mod list_invoices;
mod update_invoice_status;

pub use create_invoice::{CreateInvoiceCommand, CreateInvoiceHandler, CreateInvoiceResult};
pub use get_invoice::{GetInvoiceHandler, GetInvoiceQuery};
pub use list_invoices::{InvoiceParty, ListInvoicesHandler, ListInvoicesQuery};
pub use update_invoice_status::{
    UpdateInvoiceStatusCommand, UpdateInvoiceStatusHandler, UpdateInvoiceStatusResult,
};
