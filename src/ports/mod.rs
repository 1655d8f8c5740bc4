//! Ports - the contracts between the application core and the outside
//! world. Adapters implement them; handlers depend on them as trait
//! objects.

pub mod account_store;
pub mod blob_store;
pub mod checkout_gateway;
pub mod credit_ledger;
pub mod invoice_store;
pub mod notifier;
pub mod verification_store;

pub use account_store::AccountStore;
pub use blob_store::BlobStore;
pub use checkout_gateway::{CheckoutGateway, CheckoutSession, CreateCheckoutRequest};
pub use credit_ledger::CreditLedger;
pub use invoice_store::InvoiceStore;
pub use notifier::{Notification, Notifier};
pub use verification_store::VerificationStore;
