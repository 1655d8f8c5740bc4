//! Invoice domain - lesson prepayment state machine.

mod aggregate;
mod errors;
mod status;

pub use aggregate::Invoice;
pub use errors::InvoiceError;
pub use status::InvoiceStatus;
