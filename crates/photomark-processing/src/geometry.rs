//! Bounding-box fit computation and resize
//!
//! The scale factor is uniform for both axes, so the source aspect
//! ratio is preserved exactly. The factor is clamped to 1.0: an image
//! already inside the box is never enlarged (shrink-only fit).

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use photomark_core::PipelineError;

/// Maximum output dimensions. Process-wide, constant for the process
/// lifetime; both values must be greater than zero (validated at
/// startup).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub max_width: u32,
    pub max_height: u32,
}

impl BoundingBox {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        debug_assert!(max_width > 0 && max_height > 0);
        BoundingBox {
            max_width,
            max_height,
        }
    }
}

/// Compute target dimensions that fit the source inside the box.
///
/// Scale factor = min(max_width / src_width, max_height / src_height),
/// clamped to at most 1.0. Each target dimension is the rounded scaled
/// source dimension, floored at 1.
pub fn compute_fit(
    src_width: u32,
    src_height: u32,
    bounds: &BoundingBox,
) -> Result<(u32, u32), PipelineError> {
    if src_width == 0 || src_height == 0 {
        return Err(PipelineError::InvalidGeometry {
            width: src_width,
            height: src_height,
        });
    }

    let scale = f64::min(
        bounds.max_width as f64 / src_width as f64,
        bounds.max_height as f64 / src_height as f64,
    )
    .min(1.0);

    let target_width = ((src_width as f64 * scale).round() as u32).max(1);
    let target_height = ((src_height as f64 * scale).round() as u32).max(1);

    Ok((target_width, target_height))
}

/// Select a resize filter for the scale direction. Lanczos gives the
/// best results when shrinking; Catmull-Rom is cheaper and sufficient
/// for the identity/edge cases.
fn select_filter(src_width: u32, src_height: u32, dst_width: u32, dst_height: u32) -> FilterType {
    if dst_width < src_width || dst_height < src_height {
        FilterType::Lanczos3
    } else {
        FilterType::CatmullRom
    }
}

/// Resize the image to its computed fit dimensions. Returns the input
/// unchanged (cloned) when it already fits the box.
pub fn fit_resize(img: &DynamicImage, bounds: &BoundingBox) -> Result<DynamicImage, PipelineError> {
    let (src_width, src_height) = img.dimensions();
    let (target_width, target_height) = compute_fit(src_width, src_height, bounds)?;

    if (target_width, target_height) == (src_width, src_height) {
        return Ok(img.clone());
    }

    tracing::debug!(
        src_width,
        src_height,
        target_width,
        target_height,
        "resizing to fit bounding box"
    );

    Ok(img.resize_exact(
        target_width,
        target_height,
        select_filter(src_width, src_height, target_width, target_height),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_fit_shrinks_to_box() {
        let bounds = BoundingBox::new(1024, 768);
        assert_eq!(compute_fit(4000, 3000, &bounds).unwrap(), (1024, 768));
        assert_eq!(compute_fit(2048, 768, &bounds).unwrap(), (1024, 384));
        assert_eq!(compute_fit(1024, 1536, &bounds).unwrap(), (512, 768));
    }

    #[test]
    fn test_fit_never_upscales() {
        let bounds = BoundingBox::new(1024, 768);
        assert_eq!(compute_fit(50, 50, &bounds).unwrap(), (50, 50));
        assert_eq!(compute_fit(1024, 768, &bounds).unwrap(), (1024, 768));
    }

    #[test]
    fn test_fit_preserves_aspect_ratio() {
        let bounds = BoundingBox::new(800, 800);
        for &(w, h) in &[(3000u32, 2000u32), (1234, 567), (999, 1001), (4000, 3000)] {
            let (tw, th) = compute_fit(w, h, &bounds).unwrap();
            assert!(tw <= 800 && th <= 800);
            assert!(tw <= w && th <= h);
            let src_ratio = w as f64 / h as f64;
            let dst_ratio = tw as f64 / th as f64;
            // Rounding to whole pixels perturbs the ratio slightly.
            assert!((src_ratio - dst_ratio).abs() / src_ratio < 0.01);
        }
    }

    #[test]
    fn test_fit_floors_at_one_pixel() {
        let bounds = BoundingBox::new(100, 100);
        let (tw, th) = compute_fit(10000, 10, &bounds).unwrap();
        assert_eq!(tw, 100);
        assert_eq!(th, 1);
    }

    #[test]
    fn test_fit_rejects_zero_sized_source() {
        let bounds = BoundingBox::new(100, 100);
        assert!(matches!(
            compute_fit(0, 100, &bounds),
            Err(PipelineError::InvalidGeometry { .. })
        ));
        assert!(matches!(
            compute_fit(100, 0, &bounds),
            Err(PipelineError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn test_fit_resize_applies_computed_dimensions() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            800,
            600,
            Rgba([255, 255, 255, 255]),
        ));
        let resized = fit_resize(&img, &BoundingBox::new(400, 300)).unwrap();
        assert_eq!(resized.dimensions(), (400, 300));
    }

    #[test]
    fn test_fit_resize_leaves_small_image_unchanged() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(50, 50, Rgba([0, 0, 0, 255])));
        let resized = fit_resize(&img, &BoundingBox::new(1024, 768)).unwrap();
        assert_eq!(resized.dimensions(), (50, 50));
    }

    #[test]
    fn test_select_filter() {
        assert_eq!(select_filter(800, 600, 400, 300), FilterType::Lanczos3);
        assert_eq!(select_filter(50, 50, 50, 50), FilterType::CatmullRom);
    }
}
