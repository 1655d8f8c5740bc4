//! Account-level mentor verification status.

use serde::{Deserialize, Serialize};

/// Whether an account is allowed to advertise paid mentorship services.
///
/// Moves to `PendingVerification` when a verification request is submitted,
/// to `Verified` on approval, and back to `Unverified` on decline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountVerificationStatus {
    Unverified,
    PendingVerification,
    Verified,
}

impl AccountVerificationStatus {
    /// Single-letter storage code (matches the persisted schema).
    pub fn code(&self) -> &'static str {
        match self {
            AccountVerificationStatus::Unverified => "U",
            AccountVerificationStatus::PendingVerification => "P",
            AccountVerificationStatus::Verified => "V",
        }
    }

    /// Parses a storage code back into a status.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "U" => Some(AccountVerificationStatus::Unverified),
            "P" => Some(AccountVerificationStatus::PendingVerification),
            "V" => Some(AccountVerificationStatus::Verified),
            _ => None,
        }
    }
}

impl Default for AccountVerificationStatus {
    fn default() -> Self {
        AccountVerificationStatus::Unverified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for status in [
            AccountVerificationStatus::Unverified,
            AccountVerificationStatus::PendingVerification,
            AccountVerificationStatus::Verified,
        ] {
            assert_eq!(
                AccountVerificationStatus::from_code(status.code()),
                Some(status)
            );
        }
    }

    #[test]
    fn unknown_code_is_none() {
        assert_eq!(AccountVerificationStatus::from_code("X"), None);
    }

    #[test]
    fn default_is_unverified() {
        assert_eq!(
            AccountVerificationStatus::default(),
            AccountVerificationStatus::Unverified
        );
    }
}
