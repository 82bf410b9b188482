//! Watermark compositing
//!
//! A single fixed watermark asset is loaded once per process and
//! composited onto the bottom-right corner of every transformed image.
//! The watermark keeps its own pixel dimensions; when it is larger
//! than the base image the overlay clips at the image edges instead of
//! failing.

use image::{imageops, DynamicImage, GenericImageView, ImageReader, RgbaImage};
use photomark_core::PipelineError;
use std::io::Cursor;
use std::path::Path;

/// The fixed overlay image. Immutable and shared read-only across
/// invocations for the process lifetime.
pub struct WatermarkAsset {
    image: RgbaImage,
}

impl WatermarkAsset {
    /// Load the watermark from its bundled file. Called once at startup.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let data = std::fs::read(path).map_err(|e| {
            PipelineError::ImageProcessing(format!(
                "failed to read watermark asset {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_bytes(&data)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, PipelineError> {
        let image = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| PipelineError::ImageProcessing(format!("failed to probe watermark: {e}")))?
            .decode()
            .map_err(|e| {
                PipelineError::ImageProcessing(format!("failed to decode watermark: {e}"))
            })?
            .to_rgba8();

        Ok(WatermarkAsset { image })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Overlay the watermark onto the bottom-right corner of the base
/// image, returning a new buffer. Neither input is mutated.
pub fn composite_bottom_right(base: &DynamicImage, watermark: &WatermarkAsset) -> DynamicImage {
    let (img_width, img_height) = base.dimensions();
    let (wm_width, wm_height) = watermark.dimensions();

    let x = (img_width as i64 - wm_width as i64).max(0);
    let y = (img_height as i64 - wm_height as i64).max(0);

    let mut img_rgba = base.to_rgba8();
    imageops::overlay(&mut img_rgba, &watermark.image, x, y);

    DynamicImage::ImageRgba8(img_rgba)
}
