//! PostgreSQL adapters - implementations of the persistence ports.

mod account_store;
mod credit_ledger;
mod invoice_store;
mod verification_store;

pub use account_store::PostgresAccountStore;
pub use credit_ledger::PostgresCreditLedger;
pub use invoice_store::PostgresInvoiceStore;
pub use verification_store::PostgresVerificationStore;
