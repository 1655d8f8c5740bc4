//! Blob storage configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Blob storage configuration (local filesystem)
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory where uploaded documents are written
    #[serde(default = "default_base_dir")]
    pub base_dir: String,

    /// Public URL prefix under which stored files are served
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_dir.is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE_BASE_DIR"));
        }
        if !self.public_base_url.starts_with("http://")
            && !self.public_base_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidStorageBaseUrl);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            public_base_url: default_public_base_url(),
        }
    }
}

fn default_base_dir() -> String {
    "uploads".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080/files".to_string()
}
