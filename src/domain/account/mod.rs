//! Account domain - balances, verification status, and mentor profiles.

mod aggregate;
mod service;
mod verification_status;

pub use aggregate::{Account, MentorProfile};
pub use service::{CategoryAssociation, ServicePriceType, ServiceRole};
pub use verification_status::AccountVerificationStatus;
