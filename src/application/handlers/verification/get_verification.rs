//! GetVerificationHandler - Query handler for a single verification.

use std::sync::Arc;

use crate::domain::foundation::VerificationId;
use crate::domain::verification::{Verification, VerificationError};
use crate::ports::VerificationStore;

/// Query for one verification by id.
#[derive(Debug, Clone)]
pub struct GetVerificationQuery {
    pub verification_id: VerificationId,
}

/// Handler for verification lookups.
pub struct GetVerificationHandler {
    verification_store: Arc<dyn VerificationStore>,
}

impl GetVerificationHandler {
    pub fn new(verification_store: Arc<dyn VerificationStore>) -> Self {
        Self { verification_store }
    }

    pub async fn handle(
        &self,
        query: GetVerificationQuery,
    ) -> Result<Verification, VerificationError> {
        self.verification_store
            .find_by_id(query.verification_id)
            .await?
            .ok_or(VerificationError::NotFound(query.verification_id))
    }
}
