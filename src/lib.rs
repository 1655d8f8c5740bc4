//! MentorHub - mentorship marketplace backend.
//!
//! This crate implements the credit economy connecting mentees and mentors:
//! lesson invoices settled from prepaid credit balances, mentor verification
//! with admin review, and credit purchases through a payment provider.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
