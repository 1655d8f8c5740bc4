//! Account aggregate entity.
//!
//! An account is one side (or both sides) of the marketplace: it carries
//! the credit balance, the mentor verification status, and the public
//! mentor profile. Category associations are stored as explicit records
//! (see [`super::CategoryAssociation`]), not embedded here.
//!
//! # Invariants
//!
//! - `balance >= 0` after every operation
//! - `verification_status` only reaches `Verified` through an approved
//!   verification, which also promotes the submitted profile snapshot

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, Credits, Timestamp, ValidationError};
use crate::domain::ledger::LedgerError;

use super::{AccountVerificationStatus, ServicePriceType};

/// Public mentor profile fields, promoted onto the account when a
/// verification is approved.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MentorProfile {
    /// Stored URL of the uploaded identity document.
    pub id_card_photo: Option<String>,

    /// Free-form bio shown on the mentor's listing.
    pub about_me_text: Option<String>,

    /// Stored URL of the uploaded introduction video.
    pub about_me_video_link: Option<String>,

    /// Stored URL of the uploaded CV.
    pub cv_link: Option<String>,

    /// Advertised price, in the marketplace's display currency.
    pub service_price: Option<f64>,

    /// How the price is quoted.
    pub service_price_type: ServicePriceType,
}

/// Account aggregate - a user's balance, verification state, and profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for this account.
    pub id: AccountId,

    /// Login email, unique across the marketplace. Payment webhooks
    /// resolve the target account by this address.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Current credit balance. Never negative.
    pub balance: Credits,

    /// Mentor verification state.
    pub verification_status: AccountVerificationStatus,

    /// Public mentor profile.
    pub profile: MentorProfile,

    /// When the account was created.
    pub created_at: Timestamp,

    /// When the account was last updated.
    pub updated_at: Timestamp,
}

impl Account {
    /// Creates a new account with a zero balance.
    pub fn new(
        id: AccountId,
        email: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let email = email.into();
        let name = name.into();
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        let now = Timestamp::now();
        Ok(Self {
            id,
            email,
            name,
            balance: Credits::ZERO,
            verification_status: AccountVerificationStatus::Unverified,
            profile: MentorProfile::default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Removes `amount` credits from the balance.
    ///
    /// Requires a strictly positive amount. Fails with
    /// `LedgerError::InsufficientBalance` without mutating the balance if
    /// the account cannot cover the debit. Returns the new balance.
    pub fn debit(&mut self, amount: Credits) -> Result<Credits, LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::NonPositiveAmount);
        }
        match self.balance.checked_sub(amount) {
            Some(remaining) => {
                self.balance = remaining;
                self.updated_at = Timestamp::now();
                Ok(remaining)
            }
            None => Err(LedgerError::insufficient_balance(
                self.id,
                amount,
                self.balance,
            )),
        }
    }

    /// Adds `amount` credits to the balance. Returns the new balance.
    pub fn credit(&mut self, amount: Credits) -> Result<Credits, LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::NonPositiveAmount);
        }
        self.balance = self
            .balance
            .add(amount)
            .map_err(|e| LedgerError::infrastructure(e.to_string()))?;
        self.updated_at = Timestamp::now();
        Ok(self.balance)
    }

    /// Marks the account as awaiting verification review.
    ///
    /// Called when a verification request is submitted.
    pub fn begin_verification(&mut self) {
        self.verification_status = AccountVerificationStatus::PendingVerification;
        self.updated_at = Timestamp::now();
    }

    /// Promotes an approved verification's profile snapshot onto the
    /// account and marks it `Verified`.
    ///
    /// The snapshot replaces the profile wholesale; it is never merged
    /// with existing fields.
    pub fn promote_verified_profile(&mut self, profile: MentorProfile) {
        self.profile = profile;
        self.verification_status = AccountVerificationStatus::Verified;
        self.updated_at = Timestamp::now();
    }

    /// Returns the account to `Unverified` after a declined verification.
    ///
    /// Existing profile fields are deliberately left untouched.
    pub fn mark_unverified(&mut self) {
        self.verification_status = AccountVerificationStatus::Unverified;
        self.updated_at = Timestamp::now();
    }
}
