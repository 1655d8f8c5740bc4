//! Axum router configuration for verification endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    approve_verification, create_verification, decline_verification, get_verification,
    list_verifications, VerificationAppState,
};

/// Create the verification API router.
///
/// # Routes
///
/// - `POST /` - Submit a verification request (multipart)
/// - `GET /` - List requests (`?status=&account_id=`)
/// - `GET /:id` - Fetch one request
/// - `POST /:id/approve` - Approve a pending request
/// - `POST /:id/decline` - Decline a pending request
pub fn verification_routes() -> Router<VerificationAppState> {
    Router::new()
        .route("/", post(create_verification).get(list_verifications))
        .route("/:id", get(get_verification))
        .route("/:id/approve", post(approve_verification))
        .route("/:id/decline", post(decline_verification))
}
