//! Domain layer - aggregates, value objects, and pure business rules.
//!
//! Nothing in this layer touches a database, the network, or the clock
//! beyond `Timestamp::now`. All persistence and delivery concerns live
//! behind ports.

pub mod account;
pub mod billing;
pub mod foundation;
pub mod invoice;
pub mod ledger;
pub mod verification;
