//! Re-encoding of transformed pixels to the source format.

use crate::format::ImageKind;
use bytes::Bytes;
use image::{DynamicImage, ImageFormat};
use photomark_core::PipelineError;
use std::io::Cursor;

const JPEG_QUALITY: f32 = 85.0;

/// Encode the image back to the source format token.
pub fn encode_image(img: &DynamicImage, kind: ImageKind) -> Result<Bytes, PipelineError> {
    match kind {
        ImageKind::Jpeg => encode_jpeg(img),
        ImageKind::Png => encode_png(img),
    }
}

/// Encode to JPEG using mozjpeg. The compositor produces RGBA; JPEG
/// carries no alpha, so the buffer is flattened to RGB first.
fn encode_jpeg(img: &DynamicImage) -> Result<Bytes, PipelineError> {
    let rgb_img = img.to_rgb8();
    let (width, height) = rgb_img.dimensions();

    let mut comp = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
    comp.set_size(width as usize, height as usize);
    comp.set_quality(JPEG_QUALITY);
    comp.set_progressive_mode();
    comp.set_optimize_coding(true);

    let mut comp = comp
        .start_compress(Vec::new())
        .map_err(|e| PipelineError::ImageProcessing(format!("jpeg encode: {e}")))?;
    comp.write_scanlines(&rgb_img)
        .map_err(|e| PipelineError::ImageProcessing(format!("jpeg encode: {e}")))?;
    let jpeg_data = comp
        .finish()
        .map_err(|e| PipelineError::ImageProcessing(format!("jpeg encode: {e}")))?;

    Ok(Bytes::from(jpeg_data))
}

fn encode_png(img: &DynamicImage) -> Result<Bytes, PipelineError> {
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| PipelineError::ImageProcessing(format!("png encode: {e}")))?;

    Ok(Bytes::from(buffer))
}
