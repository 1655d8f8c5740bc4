//! HTTP adapter for the verification workflow.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::VerificationAppState;
pub use routes::verification_routes;
