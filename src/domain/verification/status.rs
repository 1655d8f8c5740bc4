//! Verification request status state machine.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a mentor verification request.
///
/// A request transitions exactly once away from `Pending`; `Approved` and
/// `Declined` are both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Declined,
}

impl VerificationStatus {
    /// Two-letter storage code (matches the persisted schema).
    pub fn code(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "PD",
            VerificationStatus::Approved => "AP",
            VerificationStatus::Declined => "DC",
        }
    }

    /// Parses a storage code back into a status.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PD" => Some(VerificationStatus::Pending),
            "AP" => Some(VerificationStatus::Approved),
            "DC" => Some(VerificationStatus::Declined),
            _ => None,
        }
    }

    /// Returns true if no further transitions are allowed from this state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, VerificationStatus::Pending)
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Approved => "approved",
            VerificationStatus::Declined => "declined",
        };
        write!(f, "{}", s)
    }
}
