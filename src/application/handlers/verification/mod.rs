//! Verification workflow handlers.

mod approve_verification;
mod create_verification;
mod decline_verification;
mod get_verification;
mod list_verifications;

pub use approve_verification::{ApproveVerificationCommand, ApproveVerificationHandler};
pub use create_verification::{
    CreateVerificationCommand, CreateVerificationHandler, DocumentUpload,
};
pub use decline_verification::{DeclineVerificationCommand, DeclineVerificationHandler};
pub use get_verification::{GetVerificationHandler, GetVerificationQuery};
pub use list_verifications::{ListVerificationsHandler, ListVerificationsQuery};
