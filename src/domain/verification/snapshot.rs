//! The profile snapshot submitted with a verification request.

use serde::{Deserialize, Serialize};

use crate::domain::account::{MentorProfile, ServicePriceType};
use crate::domain::foundation::{CategoryId, ValidationError};

/// Everything a mentor submits for review, frozen at submission time.
///
/// The category list is a typed, ordered list of identifiers validated at
/// the boundary - not the JSON-encoded free-form list the original schema
/// stored. On approval the profile fields are copied onto the account and
/// the category list replaces the account's providing associations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationSnapshot {
    /// Stored URL of the uploaded identity document.
    pub id_card_photo: String,

    /// Free-form bio.
    pub about_me_text: Option<String>,

    /// Stored URL of the uploaded introduction video.
    pub about_me_video_link: Option<String>,

    /// Stored URL of the uploaded CV.
    pub cv_link: Option<String>,

    /// Advertised price.
    pub service_price: Option<f64>,

    /// How the price is quoted.
    pub service_price_type: ServicePriceType,

    /// Ordered list of categories the mentor will provide services in.
    pub categories: Vec<CategoryId>,
}

impl VerificationSnapshot {
    /// Validates invariants that must hold before the snapshot enters the
    /// workflow: a present identity document, at least one category, no
    /// duplicate categories, and a non-negative price.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id_card_photo.is_empty() {
            return Err(ValidationError::empty_field("id_card_photo"));
        }
        if self.categories.is_empty() {
            return Err(ValidationError::empty_field("categories"));
        }
        let mut seen = std::collections::HashSet::new();
        for category in &self.categories {
            if !seen.insert(category) {
                return Err(ValidationError::invalid_format(
                    "categories",
                    format!("duplicate category {}", category),
                ));
            }
        }
        if let Some(price) = self.service_price {
            if !price.is_finite() || price < 0.0 {
                return Err(ValidationError::invalid_format(
                    "service_price",
                    "must be a non-negative number",
                ));
            }
        }
        Ok(())
    }

    /// The profile fields to copy onto the account on approval.
    pub fn to_profile(&self) -> MentorProfile {
        MentorProfile {
            id_card_photo: Some(self.id_card_photo.clone()),
            about_me_text: self.about_me_text.clone(),
            about_me_video_link: self.about_me_video_link.clone(),
            cv_link: self.cv_link.clone(),
            service_price: self.service_price,
            service_price_type: self.service_price_type,
        }
    }
}
