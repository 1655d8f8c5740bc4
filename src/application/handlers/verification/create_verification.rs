//! CreateVerificationHandler - Command handler for submitting a mentor
//! verification request.
//!
//! Attachments are uploaded to blob storage first; the snapshot then
//! carries their stored URLs and the pending verification row commits
//! together with the account's `PendingVerification` flip.

use std::sync::Arc;

use crate::domain::account::ServicePriceType;
use crate::domain::foundation::{AccountId, CategoryId, VerificationId};
use crate::domain::verification::{Verification, VerificationError, VerificationSnapshot};
use crate::ports::{AccountStore, BlobStore, VerificationStore};

/// A document uploaded with the verification request.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Command to submit a verification request.
#[derive(Debug, Clone)]
pub struct CreateVerificationCommand {
    /// The account requesting mentor verification.
    pub account_id: AccountId,
    /// Identity document. Required.
    pub id_card: DocumentUpload,
    /// CV document, if provided.
    pub cv: Option<DocumentUpload>,
    /// Introduction video, if provided.
    pub intro_video: Option<DocumentUpload>,
    /// Free-form bio.
    pub about_me_text: Option<String>,
    /// Advertised price.
    pub service_price: Option<f64>,
    /// How the price is quoted.
    pub service_price_type: ServicePriceType,
    /// Categories the mentor will provide services in.
    pub categories: Vec<CategoryId>,
}

/// Handler for verification submissions.
pub struct CreateVerificationHandler {
    verification_store: Arc<dyn VerificationStore>,
    account_store: Arc<dyn AccountStore>,
    blob_store: Arc<dyn BlobStore>,
}

impl CreateVerificationHandler {
    pub fn new(
        verification_store: Arc<dyn VerificationStore>,
        account_store: Arc<dyn AccountStore>,
        blob_store: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            verification_store,
            account_store,
            blob_store,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateVerificationCommand,
    ) -> Result<Verification, VerificationError> {
        let mut account = self
            .account_store
            .find_by_id(cmd.account_id)
            .await
            .map_err(|e| VerificationError::infrastructure(e.to_string()))?
            .ok_or(VerificationError::AccountNotFound(cmd.account_id))?;

        let verification_id = VerificationId::new();

        let id_card_photo = self
            .upload(cmd.account_id, verification_id, "id_card", &cmd.id_card)
            .await?;
        let cv_link = match &cmd.cv {
            Some(doc) => Some(self.upload(cmd.account_id, verification_id, "cv", doc).await?),
            None => None,
        };
        let about_me_video_link = match &cmd.intro_video {
            Some(doc) => Some(
                self.upload(cmd.account_id, verification_id, "intro_video", doc)
                    .await?,
            ),
            None => None,
        };

        let snapshot = VerificationSnapshot {
            id_card_photo,
            about_me_text: cmd.about_me_text,
            about_me_video_link,
            cv_link,
            service_price: cmd.service_price,
            service_price_type: cmd.service_price_type,
            categories: cmd.categories,
        };

        let verification = Verification::create(verification_id, cmd.account_id, snapshot)?;
        account.begin_verification();

        self.verification_store
            .insert_pending(&verification, &account)
            .await?;

        tracing::info!(
            verification_id = %verification.id,
            account_id = %verification.account_id,
            "Verification request submitted"
        );

        Ok(verification)
    }

    async fn upload(
        &self,
        account_id: AccountId,
        verification_id: VerificationId,
        slot: &str,
        doc: &DocumentUpload,
    ) -> Result<String, VerificationError> {
        let key = format!(
            "verifications/{}/{}/{}-{}",
            account_id, verification_id, slot, doc.filename
        );
        self.blob_store
            .put(&key, doc.bytes.clone(), &doc.content_type)
            .await
            .map_err(|e| VerificationError::UploadFailed(e.to_string()))
    }
}
