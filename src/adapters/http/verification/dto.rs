//! HTTP DTOs for verification endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::account::ServicePriceType;
use crate::domain::foundation::{AccountId, CategoryId, Timestamp, VerificationId};
use crate::domain::verification::{Verification, VerificationStatus};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to decline a pending verification.
#[derive(Debug, Clone, Deserialize)]
pub struct DeclineVerificationRequest {
    pub reason: String,
}

/// Query parameters for verification listings.
#[derive(Debug, Clone, Deserialize)]
pub struct ListVerificationsParams {
    #[serde(default)]
    pub status: Option<VerificationStatus>,
    #[serde(default)]
    pub account_id: Option<AccountId>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// The submitted profile carried by a verification request.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationSnapshotResponse {
    pub id_card_photo: String,
    pub about_me_text: Option<String>,
    pub about_me_video_link: Option<String>,
    pub cv_link: Option<String>,
    pub service_price: Option<f64>,
    pub service_price_type: ServicePriceType,
    pub categories: Vec<CategoryId>,
}

/// Verification representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationResponse {
    pub id: VerificationId,
    pub account_id: AccountId,
    pub status: VerificationStatus,
    pub snapshot: VerificationSnapshotResponse,
    pub decline_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Verification> for VerificationResponse {
    fn from(verification: Verification) -> Self {
        let snapshot = verification.snapshot;
        Self {
            id: verification.id,
            account_id: verification.account_id,
            status: verification.status,
            snapshot: VerificationSnapshotResponse {
                id_card_photo: snapshot.id_card_photo,
                about_me_text: snapshot.about_me_text,
                about_me_video_link: snapshot.about_me_video_link,
                cv_link: snapshot.cv_link,
                service_price: snapshot.service_price,
                service_price_type: snapshot.service_price_type,
                categories: snapshot.categories,
            },
            decline_reason: verification.decline_reason,
            created_at: verification.created_at,
            updated_at: verification.updated_at,
        }
    }
}

/// Response for verification listings.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationListResponse {
    pub verifications: Vec<VerificationResponse>,
}
