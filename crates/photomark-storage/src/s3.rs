use crate::traits::{validate_key, ObjectStorage, StorageError, StorageResult, StoredObject};
use crate::{mime, StorageBackend};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::{
    Attribute, Attributes, Error as ObjectStoreError, ObjectStore, PutOptions, PutPayload,
    Result as ObjectResult,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// S3 storage implementation
///
/// Client handles are built lazily per bucket and cached for the process
/// lifetime, so the source and destination buckets each get one handle.
pub struct S3Storage {
    region: Option<String>,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
    stores: Mutex<HashMap<String, Arc<AmazonS3>>>,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub fn new(region: Option<String>, endpoint_url: Option<String>) -> Self {
        S3Storage {
            region,
            endpoint_url,
            stores: Mutex::new(HashMap::new()),
        }
    }

    fn store_for(&self, bucket: &str) -> StorageResult<Arc<AmazonS3>> {
        let mut stores = self
            .stores
            .lock()
            .map_err(|_| StorageError::ConfigError("client cache poisoned".to_string()))?;

        if let Some(store) = stores.get(bucket) {
            return Ok(Arc::clone(store));
        }

        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket.to_string());

        if let Some(ref region) = self.region {
            builder = builder.with_region(region.clone());
        }

        if let Some(ref endpoint) = self.endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = Arc::new(
            builder
                .build()
                .map_err(|e| StorageError::ConfigError(e.to_string()))?,
        );

        stores.insert(bucket.to_string(), Arc::clone(&store));
        Ok(store)
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn download(&self, bucket: &str, key: &str) -> StorageResult<StoredObject> {
        validate_key(key)?;
        let store = self.store_for(bucket)?;
        let location = Path::from(key.to_string());
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = store.get(&location).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => {
                StorageError::NotFound(format!("{}/{}", bucket, key))
            }
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 download failed"
                );
                StorageError::DownloadFailed(other.to_string())
            }
        })?;

        let content_type = result
            .attributes
            .get(&Attribute::ContentType)
            .map(|v| v.to_string())
            .unwrap_or_else(|| mime::infer(key).to_string());

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = bytes.len(),
            content_type = %content_type,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 download successful"
        );

        Ok(StoredObject {
            data: bytes,
            content_type,
        })
    }

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<()> {
        validate_key(key)?;
        let store = self.store_for(bucket)?;
        let location = Path::from(key.to_string());
        let size = data.len();
        let start = std::time::Instant::now();

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());

        let result: ObjectResult<_> = store
            .put_opts(
                &location,
                PutPayload::from(data),
                PutOptions {
                    attributes,
                    ..Default::default()
                },
            )
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            content_type = %content_type,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
