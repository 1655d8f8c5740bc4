//! HTTP adapters exposing the application handlers over a JSON API.

pub mod billing;
pub mod error;
pub mod invoice;
pub mod verification;

pub use error::ErrorResponse;
