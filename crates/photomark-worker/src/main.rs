mod consumer;
mod telemetry;

use photomark_core::AppConfig;
use photomark_processing::{BoundingBox, TransformPipeline, WatermarkAsset};
use photomark_storage::create_storage;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    telemetry::init_telemetry()?;

    // Load configuration; a bad bounding box or missing destination
    // bucket stops the process here, never per-invocation.
    let config = AppConfig::from_env()?;

    let storage = create_storage(&config).await?;

    // The watermark asset is read exactly once and shared read-only
    // across invocations.
    let watermark = Arc::new(WatermarkAsset::load(&config.watermark_path)?);
    let (width, height) = watermark.dimensions();
    tracing::info!(
        path = %config.watermark_path.display(),
        width,
        height,
        "watermark asset loaded"
    );

    let pipeline = TransformPipeline::new(
        storage,
        config.destination_bucket.clone(),
        BoundingBox::new(config.max_width, config.max_height),
        watermark,
        config.copyright_text.clone(),
    );

    consumer::run(&config, pipeline).await
}
