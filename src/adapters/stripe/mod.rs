//! Stripe adapter - checkout sessions and webhook verification.

mod gateway;

pub use gateway::{StripeConfig, StripeGateway};
