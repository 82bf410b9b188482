use crate::traits::{validate_key, ObjectStorage, StorageError, StorageResult, StoredObject};
use crate::{mime, StorageBackend};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Buckets map to subdirectories of the base path. Content-types are
/// not persisted; downloads infer them from the key suffix.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for object storage (e.g., "/var/lib/photomark")
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    /// Convert a (bucket, key) pair to a filesystem path, rejecting
    /// anything that could resolve outside the base directory.
    fn object_path(&self, bucket: &str, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        if bucket.is_empty() || bucket.contains("..") || bucket.contains('/') {
            return Err(StorageError::InvalidKey(format!(
                "invalid bucket name: {}",
                bucket
            )));
        }
        Ok(self.base_path.join(bucket).join(key))
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn download(&self, bucket: &str, key: &str) -> StorageResult<StoredObject> {
        let path = self.object_path(bucket, key)?;
        let start = std::time::Instant::now();

        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(format!("{}/{}", bucket, key))
            } else {
                StorageError::DownloadFailed(format!(
                    "Failed to read file {}: {}",
                    path.display(),
                    e
                ))
            }
        })?;

        let content_type = mime::infer(key).to_string();

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage download successful"
        );

        Ok(StoredObject {
            data: Bytes::from(data),
            content_type,
        })
    }

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        _content_type: &str,
    ) -> StorageResult<()> {
        let path = self.object_path(bucket, key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_storage() -> (tempfile::TempDir, LocalStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        (dir, storage)
    }

    #[tokio::test]
    async fn test_upload_download_roundtrip() {
        let (_dir, storage) = test_storage().await;

        let payload = Bytes::from_static(b"fake image bytes");
        storage
            .upload("photos-in", "vacation.jpg", payload.clone(), "image/jpeg")
            .await
            .unwrap();

        let object = storage.download("photos-in", "vacation.jpg").await.unwrap();
        assert_eq!(object.data, payload);
        assert_eq!(object.content_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_download_infers_content_type() {
        let (_dir, storage) = test_storage().await;

        storage
            .upload("b", "icon.png", Bytes::from_static(b"png"), "image/png")
            .await
            .unwrap();
        let object = storage.download("b", "icon.png").await.unwrap();
        assert_eq!(object.content_type, "image/png");
    }

    #[tokio::test]
    async fn test_download_missing_object() {
        let (_dir, storage) = test_storage().await;

        let result = storage.download("photos-in", "missing.jpg").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_nested_keys_create_directories() {
        let (_dir, storage) = test_storage().await;

        storage
            .upload(
                "b",
                "albums/2026/summer.jpg",
                Bytes::from_static(b"data"),
                "image/jpeg",
            )
            .await
            .unwrap();
        let object = storage.download("b", "albums/2026/summer.jpg").await.unwrap();
        assert_eq!(object.data.as_ref(), b"data");
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let (_dir, storage) = test_storage().await;

        let result = storage
            .upload("b", "../escape.jpg", Bytes::from_static(b"x"), "image/jpeg")
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.download("..", "a.jpg").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }
}
