//! Filesystem implementation of the BlobStore port.
//!
//! Stores verification documents under a configurable base directory and
//! serves them back through a configured public base URL. Writes go
//! through a temporary file and a rename, so a crashed upload never
//! leaves a half-written document.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::BlobStore;

/// Filesystem-based blob storage.
pub struct FsBlobStore {
    base_dir: PathBuf,
    public_base_url: String,
}

impl FsBlobStore {
    /// Creates new filesystem storage rooted at `base_dir`, serving
    /// blobs from `public_base_url`.
    pub fn new(base_dir: impl AsRef<Path>, public_base_url: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn file_path(&self, key: &str) -> Result<PathBuf, DomainError> {
        // Keys are server-generated, but refuse traversal outright.
        if key.split('/').any(|part| part == "..") || key.starts_with('/') {
            return Err(DomainError::new(
                ErrorCode::StorageError,
                format!("Invalid blob key: {}", key),
            ));
        }
        Ok(self.base_dir.join(key))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, DomainError> {
        let file_path = self.file_path(key)?;

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::new(
                    ErrorCode::StorageError,
                    format!("Failed to create directory: {}", e),
                )
            })?;
        }

        let temp_path = file_path.with_extension("tmp");
        fs::write(&temp_path, bytes).await.map_err(|e| {
            DomainError::new(
                ErrorCode::StorageError,
                format!("Failed to write blob: {}", e),
            )
        })?;
        fs::rename(&temp_path, &file_path).await.map_err(|e| {
            DomainError::new(
                ErrorCode::StorageError,
                format!("Failed to finalize blob: {}", e),
            )
        })?;

        Ok(format!("{}/{}", self.public_base_url, key))
    }
}
