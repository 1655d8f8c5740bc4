//! Verification domain - mentor onboarding review state machine.

mod aggregate;
mod errors;
mod snapshot;
mod status;

pub use aggregate::Verification;
pub use errors::VerificationError;
pub use snapshot::VerificationSnapshot;
pub use status::VerificationStatus;
