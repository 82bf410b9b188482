//! Image format classification
//!
//! The pipeline supports exactly two still-image formats. The format
//! token is derived from the object key's suffix before any bytes are
//! decoded; the accepted literal set is `jpg`, `jpeg`, and `png`,
//! matched case-sensitively (`photo.JPG` is rejected).

use photomark_core::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    pub fn content_type(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Png => "image/png",
        }
    }

    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageKind::Jpeg => image::ImageFormat::Jpeg,
            ImageKind::Png => image::ImageFormat::Png,
        }
    }

    /// Whether the format carries EXIF metadata. Only the jpeg family
    /// does; PNG objects skip the annotation stage.
    pub fn supports_exif(self) -> bool {
        matches!(self, ImageKind::Jpeg)
    }

    pub fn name(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpeg",
            ImageKind::Png => "png",
        }
    }
}

/// Derive the format token from an object key.
///
/// Takes the substring after the last `.`; a key without a dot is
/// `UnknownFormat`, any suffix outside the accepted set is
/// `UnsupportedFormat` carrying the offending token.
pub fn classify(key: &str) -> Result<ImageKind, PipelineError> {
    let extension = match key.rsplit_once('.') {
        Some((_, extension)) => extension,
        None => {
            return Err(PipelineError::UnknownFormat {
                key: key.to_string(),
            })
        }
    };

    match extension {
        "jpg" | "jpeg" => Ok(ImageKind::Jpeg),
        "png" => Ok(ImageKind::Png),
        other => Err(PipelineError::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}
