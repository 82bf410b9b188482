//! Photomark processing library
//!
//! The transform pipeline and its stages:
//! - Format classification from object key suffixes (format)
//! - Bounding-box fit computation and resize (geometry)
//! - Watermark compositing (watermark)
//! - EXIF copyright injection (metadata)
//! - Re-encoding to the source format (encode)
//! - Stage sequencing over storage (pipeline)

pub mod encode;
pub mod format;
pub mod geometry;
pub mod metadata;
pub mod pipeline;
pub mod watermark;

pub use format::{classify, ImageKind};
pub use geometry::{compute_fit, fit_resize, BoundingBox};
pub use metadata::inject_copyright;
pub use pipeline::{ProcessedObject, TransformPipeline};
pub use watermark::{composite_bottom_right, WatermarkAsset};
