//! Storage abstraction trait
//!
//! This module defines the trait that all storage backends must implement.

use async_trait::async_trait;
use bytes::Bytes;
use photomark_core::StorageBackend;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// An object fetched from storage: raw bytes plus the content-type the
/// store declared for it.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: String,
}

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait.
/// The pipeline addresses objects as `(bucket, key)` pairs so a single
/// backend handle serves both the source and destination buckets.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Download an object, returning its bytes and declared content-type.
    async fn download(&self, bucket: &str, key: &str) -> StorageResult<StoredObject>;

    /// Upload an object under the given key with the given content-type.
    /// Uploads are atomic at object granularity; a failed upload leaves
    /// no partial object behind.
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

/// Reject keys that could escape the bucket namespace.
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() || key.contains("..") || key.starts_with('/') {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
