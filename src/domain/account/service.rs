//! Service offering value objects: pricing and category associations.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, CategoryId};

/// How a mentor's service price is quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServicePriceType {
    PerHour,
    PerLesson,
}

impl ServicePriceType {
    /// Two-letter storage code (matches the persisted schema).
    pub fn code(&self) -> &'static str {
        match self {
            ServicePriceType::PerHour => "PH",
            ServicePriceType::PerLesson => "PL",
        }
    }

    /// Parses a storage code back into a price type.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PH" => Some(ServicePriceType::PerHour),
            "PL" => Some(ServicePriceType::PerLesson),
            _ => None,
        }
    }
}

impl Default for ServicePriceType {
    fn default() -> Self {
        ServicePriceType::PerLesson
    }
}

/// An account's relationship to an activity category.
///
/// `Providing` associations are the ones replaced wholesale when a
/// verification is approved; `Seeking` associations are never touched by
/// the verification workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceRole {
    Seeking,
    Providing,
}

impl ServiceRole {
    /// Single-letter storage code.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceRole::Seeking => "S",
            ServiceRole::Providing => "P",
        }
    }

    /// Parses a storage code back into a role.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "S" => Some(ServiceRole::Seeking),
            "P" => Some(ServiceRole::Providing),
            _ => None,
        }
    }
}

/// Explicit record type for an account/category link.
///
/// Plain composition in place of the original's abstract category-relation
/// ORM base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryAssociation {
    pub account_id: AccountId,
    pub category_id: CategoryId,
    pub role: ServiceRole,
}

impl CategoryAssociation {
    pub fn providing(account_id: AccountId, category_id: CategoryId) -> Self {
        Self {
            account_id,
            category_id,
            role: ServiceRole::Providing,
        }
    }

    pub fn seeking(account_id: AccountId, category_id: CategoryId) -> Self {
        Self {
            account_id,
            category_id,
            role: ServiceRole::Seeking,
        }
    }
}
