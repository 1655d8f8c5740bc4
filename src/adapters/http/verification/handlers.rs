//! HTTP handlers for verification endpoints.
//!
//! The submission endpoint accepts a multipart form because it carries
//! document uploads alongside the profile fields.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Json, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::verification::{
    ApproveVerificationCommand, ApproveVerificationHandler, CreateVerificationCommand,
    CreateVerificationHandler, DeclineVerificationCommand, DeclineVerificationHandler,
    DocumentUpload, GetVerificationHandler, GetVerificationQuery, ListVerificationsHandler,
    ListVerificationsQuery,
};
use crate::domain::account::ServicePriceType;
use crate::domain::foundation::{AccountId, CategoryId, VerificationId};
use crate::domain::verification::VerificationError;
use crate::ports::{AccountStore, BlobStore, Notifier, VerificationStore};

use super::dto::{
    DeclineVerificationRequest, ListVerificationsParams, VerificationListResponse,
    VerificationResponse,
};

/// Shared state for verification endpoints.
#[derive(Clone)]
pub struct VerificationAppState {
    pub verification_store: Arc<dyn VerificationStore>,
    pub account_store: Arc<dyn AccountStore>,
    pub blob_store: Arc<dyn BlobStore>,
    pub notifier: Arc<dyn Notifier>,
}

impl VerificationAppState {
    fn create_handler(&self) -> CreateVerificationHandler {
        CreateVerificationHandler::new(
            self.verification_store.clone(),
            self.account_store.clone(),
            self.blob_store.clone(),
        )
    }

    fn approve_handler(&self) -> ApproveVerificationHandler {
        ApproveVerificationHandler::new(
            self.verification_store.clone(),
            self.account_store.clone(),
            self.notifier.clone(),
        )
    }

    fn decline_handler(&self) -> DeclineVerificationHandler {
        DeclineVerificationHandler::new(
            self.verification_store.clone(),
            self.account_store.clone(),
            self.notifier.clone(),
        )
    }

    fn get_handler(&self) -> GetVerificationHandler {
        GetVerificationHandler::new(self.verification_store.clone())
    }

    fn list_handler(&self) -> ListVerificationsHandler {
        ListVerificationsHandler::new(self.verification_store.clone())
    }
}

/// POST /api/verifications - Submit a mentor verification request.
///
/// Multipart form fields:
/// - `account_id` (text, required)
/// - `id_card` (file, required)
/// - `cv` (file)
/// - `intro_video` (file)
/// - `about_me_text` (text)
/// - `service_price` (text, decimal)
/// - `service_price_type` (text: `per_hour` | `per_lesson`, required)
/// - `categories` (text, JSON array of category UUIDs)
pub async fn create_verification(
    State(state): State<VerificationAppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, VerificationApiError> {
    let command = parse_submission(multipart).await?;
    let verification = state.create_handler().handle(command).await?;
    Ok((
        StatusCode::CREATED,
        Json(VerificationResponse::from(verification)),
    ))
}

/// POST /api/verifications/:id/approve - Approve a pending request.
pub async fn approve_verification(
    State(state): State<VerificationAppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, VerificationApiError> {
    let verification = state
        .approve_handler()
        .handle(ApproveVerificationCommand {
            verification_id: VerificationId::from_uuid(id),
        })
        .await?;
    Ok(Json(VerificationResponse::from(verification)))
}

/// POST /api/verifications/:id/decline - Decline a pending request.
pub async fn decline_verification(
    State(state): State<VerificationAppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<DeclineVerificationRequest>,
) -> Result<impl IntoResponse, VerificationApiError> {
    let verification = state
        .decline_handler()
        .handle(DeclineVerificationCommand {
            verification_id: VerificationId::from_uuid(id),
            reason: request.reason,
        })
        .await?;
    Ok(Json(VerificationResponse::from(verification)))
}

/// GET /api/verifications/:id - Fetch one verification request.
pub async fn get_verification(
    State(state): State<VerificationAppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, VerificationApiError> {
    let verification = state
        .get_handler()
        .handle(GetVerificationQuery {
            verification_id: VerificationId::from_uuid(id),
        })
        .await?;
    Ok(Json(VerificationResponse::from(verification)))
}

/// GET /api/verifications - List requests, optionally filtered.
pub async fn list_verifications(
    State(state): State<VerificationAppState>,
    Query(params): Query<ListVerificationsParams>,
) -> Result<impl IntoResponse, VerificationApiError> {
    let verifications = state
        .list_handler()
        .handle(ListVerificationsQuery {
            status: params.status,
            account_id: params.account_id,
        })
        .await?;
    Ok(Json(VerificationListResponse {
        verifications: verifications
            .into_iter()
            .map(VerificationResponse::from)
            .collect(),
    }))
}

async fn parse_submission(
    mut multipart: Multipart,
) -> Result<CreateVerificationCommand, VerificationApiError> {
    let mut account_id: Option<AccountId> = None;
    let mut id_card: Option<DocumentUpload> = None;
    let mut cv: Option<DocumentUpload> = None;
    let mut intro_video: Option<DocumentUpload> = None;
    let mut about_me_text: Option<String> = None;
    let mut service_price: Option<f64> = None;
    let mut service_price_type: Option<ServicePriceType> = None;
    let mut categories: Vec<CategoryId> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_field("multipart", e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "account_id" => {
                let text = read_text(field, &name).await?;
                let uuid = Uuid::from_str(&text)
                    .map_err(|_| bad_field("account_id", "must be a UUID"))?;
                account_id = Some(AccountId::from_uuid(uuid));
            }
            "id_card" => id_card = Some(read_document(field, &name).await?),
            "cv" => cv = Some(read_document(field, &name).await?),
            "intro_video" => intro_video = Some(read_document(field, &name).await?),
            "about_me_text" => about_me_text = Some(read_text(field, &name).await?),
            "service_price" => {
                let text = read_text(field, &name).await?;
                let price = text
                    .parse::<f64>()
                    .map_err(|_| bad_field("service_price", "must be a number"))?;
                service_price = Some(price);
            }
            "service_price_type" => {
                let text = read_text(field, &name).await?;
                service_price_type = Some(match text.as_str() {
                    "per_hour" => ServicePriceType::PerHour,
                    "per_lesson" => ServicePriceType::PerLesson,
                    _ => {
                        return Err(bad_field(
                            "service_price_type",
                            "must be 'per_hour' or 'per_lesson'",
                        ))
                    }
                });
            }
            "categories" => {
                let text = read_text(field, &name).await?;
                let uuids: Vec<Uuid> = serde_json::from_str(&text)
                    .map_err(|_| bad_field("categories", "must be a JSON array of UUIDs"))?;
                categories = uuids.into_iter().map(CategoryId::from_uuid).collect();
            }
            // Unknown fields are ignored.
            _ => {}
        }
    }

    Ok(CreateVerificationCommand {
        account_id: account_id.ok_or_else(|| bad_field("account_id", "is required"))?,
        id_card: id_card.ok_or_else(|| bad_field("id_card", "is required"))?,
        cv,
        intro_video,
        about_me_text,
        service_price,
        service_price_type: service_price_type
            .ok_or_else(|| bad_field("service_price_type", "is required"))?,
        categories,
    })
}

async fn read_text(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, VerificationApiError> {
    field
        .text()
        .await
        .map_err(|e| bad_field(name, e.to_string()))
}

async fn read_document(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<DocumentUpload, VerificationApiError> {
    let filename = field
        .file_name()
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("{name}.bin"));
    let content_type = field
        .content_type()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let bytes = field
        .bytes()
        .await
        .map_err(|e| bad_field(name, e.to_string()))?;
    Ok(DocumentUpload {
        filename,
        content_type,
        bytes: bytes.to_vec(),
    })
}

fn bad_field(field: &str, message: impl Into<String>) -> VerificationApiError {
    VerificationApiError(VerificationError::validation(field, message))
}

/// Wrapper mapping verification errors onto HTTP responses.
pub struct VerificationApiError(VerificationError);

impl From<VerificationError> for VerificationApiError {
    fn from(err: VerificationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for VerificationApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code) = match &self.0 {
            VerificationError::NotFound(_) => (StatusCode::NOT_FOUND, "VERIFICATION_NOT_FOUND"),
            VerificationError::AccountNotFound(_) => (StatusCode::NOT_FOUND, "ACCOUNT_NOT_FOUND"),
            VerificationError::InvalidTransition { .. } => {
                (StatusCode::CONFLICT, "INVALID_STATE_TRANSITION")
            }
            VerificationError::ValidationFailed { .. } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED")
            }
            VerificationError::UploadFailed(_) => (StatusCode::BAD_GATEWAY, "UPLOAD_FAILED"),
            VerificationError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ErrorResponse::new(code, self.0.to_string());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_maps_to_409() {
        use crate::domain::verification::VerificationStatus;

        let err = VerificationApiError(VerificationError::InvalidTransition {
            from: VerificationStatus::Approved,
            to: VerificationStatus::Declined,
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn upload_failure_maps_to_502() {
        let err = VerificationApiError(VerificationError::UploadFailed("disk full".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
