//! Transform pipeline orchestrator
//!
//! Sequences classification, download, transform, annotation, and
//! upload for one source object. Stages are strictly sequential (each
//! consumes the previous stage's output) and run at most once per
//! invocation: the first failure short-circuits the rest and surfaces
//! as a single [`PipelineError`] whose [`Stage`](photomark_core::Stage)
//! names where the invocation stopped. Nothing is retried here and no
//! partial result reaches the destination.
//!
//! Classification runs before the download so a rejected key never
//! causes a byte transfer in either direction.

use crate::encode::encode_image;
use crate::format::classify;
use crate::geometry::{fit_resize, BoundingBox};
use crate::metadata::inject_copyright;
use crate::watermark::{composite_bottom_right, WatermarkAsset};
use image::ImageReader;
use photomark_core::PipelineError;
use photomark_storage::ObjectStorage;
use std::io::Cursor;
use std::sync::Arc;

/// Result of a successful invocation.
#[derive(Debug, Clone)]
pub struct ProcessedObject {
    pub key: String,
    pub content_type: String,
    pub size_bytes: usize,
}

pub struct TransformPipeline {
    storage: Arc<dyn ObjectStorage>,
    destination_bucket: String,
    bounds: BoundingBox,
    watermark: Arc<WatermarkAsset>,
    copyright_text: String,
}

impl TransformPipeline {
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        destination_bucket: String,
        bounds: BoundingBox,
        watermark: Arc<WatermarkAsset>,
        copyright_text: String,
    ) -> Self {
        TransformPipeline {
            storage,
            destination_bucket,
            bounds,
            watermark,
            copyright_text,
        }
    }

    /// Run one end-to-end transform for the given source object. The
    /// result lands in the destination bucket under the same key.
    pub async fn process(
        &self,
        source_bucket: &str,
        key: &str,
    ) -> Result<ProcessedObject, PipelineError> {
        let start = std::time::Instant::now();

        let kind = classify(key)?;

        let object = self
            .storage
            .download(source_bucket, key)
            .await
            .map_err(|e| PipelineError::SourceFetch {
                bucket: source_bucket.to_string(),
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!(
            bucket = %source_bucket,
            key = %key,
            size_bytes = object.data.len(),
            content_type = %object.content_type,
            format = kind.name(),
            "source object downloaded"
        );

        let img = ImageReader::new(Cursor::new(object.data.as_ref()))
            .with_guessed_format()
            .map_err(|e| PipelineError::ImageProcessing(format!("failed to probe image: {e}")))?
            .decode()
            .map_err(|e| PipelineError::ImageProcessing(format!("failed to decode image: {e}")))?;

        let resized = fit_resize(&img, &self.bounds)?;
        let composited = composite_bottom_right(&resized, &self.watermark);
        let encoded = encode_image(&composited, kind)?;

        let annotated = if kind.supports_exif() {
            inject_copyright(encoded, kind, &self.copyright_text)?
        } else {
            tracing::debug!(key = %key, format = kind.name(), "format carries no embedded metadata, skipping annotation");
            encoded
        };

        let size_bytes = annotated.len();
        self.storage
            .upload(&self.destination_bucket, key, annotated, &object.content_type)
            .await
            .map_err(|e| PipelineError::DestinationWrite {
                bucket: self.destination_bucket.clone(),
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        tracing::info!(
            source_bucket = %source_bucket,
            destination_bucket = %self.destination_bucket,
            key = %key,
            size_bytes,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "transform pipeline complete"
        );

        Ok(ProcessedObject {
            key: key.to_string(),
            content_type: object.content_type,
            size_bytes,
        })
    }
}
