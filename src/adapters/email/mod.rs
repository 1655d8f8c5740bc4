//! Email adapter - outbound notification delivery.

mod notifier;

pub use notifier::{EmailConfig, HttpEmailNotifier};
