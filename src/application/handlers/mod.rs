//! Command and query handlers - the application's use cases.

pub mod billing;
pub mod invoice;
pub mod verification;

#[cfg(test)]
pub(crate) mod test_support;
