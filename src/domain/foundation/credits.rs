//! Credits value object - the marketplace's internal currency.
//!
//! Balances and invoice amounts are whole credits (no fractional units).
//! A `Credits` value is never negative; arithmetic that would go below
//! zero is rejected rather than saturated, which is what keeps the
//! `balance >= 0` invariant observable at every point.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Non-negative whole amount of marketplace credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credits(i64);

impl Credits {
    /// Zero credits.
    pub const ZERO: Credits = Credits(0);

    /// Creates a credit amount, rejecting negative values.
    pub fn new(amount: i64) -> Result<Self, ValidationError> {
        if amount < 0 {
            return Err(ValidationError::out_of_range(
                "credits",
                0,
                i64::MAX,
                amount,
            ));
        }
        Ok(Self(amount))
    }

    /// Creates a strictly positive credit amount.
    ///
    /// Ledger mutations and invoice amounts require `amount > 0`.
    pub fn positive(amount: i64) -> Result<Self, ValidationError> {
        if amount <= 0 {
            return Err(ValidationError::out_of_range(
                "credits",
                1,
                i64::MAX,
                amount,
            ));
        }
        Ok(Self(amount))
    }

    /// Returns the raw credit count.
    pub fn amount(&self) -> i64 {
        self.0
    }

    /// Returns true if this amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds another amount. Overflow is treated as invalid input.
    pub fn add(&self, other: Credits) -> Result<Credits, ValidationError> {
        self.0
            .checked_add(other.0)
            .map(Credits)
            .ok_or_else(|| ValidationError::invalid_format("credits", "addition overflow"))
    }

    /// Subtracts another amount, returning None if the result would be negative.
    pub fn checked_sub(&self, other: Credits) -> Option<Credits> {
        if other.0 > self.0 {
            None
        } else {
            Some(Credits(self.0 - other.0))
        }
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
