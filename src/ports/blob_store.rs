//! Blob store port for uploaded verification documents.
//!
//! Identity photos, CVs, and intro videos are written here before the
//! verification row is inserted; the stored URLs are what the snapshot
//! carries.

use crate::domain::foundation::DomainError;
use async_trait::async_trait;

/// Port for binary document storage.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a blob under `key` and return its public URL.
    ///
    /// Overwrites any existing blob at the same key.
    ///
    /// # Errors
    ///
    /// - `StorageError` on write failure
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, DomainError>;
}
