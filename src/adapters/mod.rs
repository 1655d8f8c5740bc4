//! Adapters connecting ports to concrete infrastructure.

pub mod email;
pub mod http;
pub mod postgres;
pub mod storage;
pub mod stripe;
