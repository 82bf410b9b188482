//! Error types module
//!
//! One invocation of the pipeline makes at most one attempt per stage;
//! every error here is terminal for that invocation and is reported
//! upward for the host to decide on redelivery. Nothing is retried
//! internally and no partial result is written to the destination.

/// Pipeline stage in which an error occurred. Used for operator-facing
/// log lines; the order matches the execution order of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Downloading,
    Transforming,
    Annotating,
    Uploading,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Validating => "validating",
            Stage::Downloading => "downloading",
            Stage::Transforming => "transforming",
            Stage::Annotating => "annotating",
            Stage::Uploading => "uploading",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("could not determine image format for key: {key}")]
    UnknownFormat { key: String },

    #[error("unsupported image format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("invalid source geometry: {width}x{height}")]
    InvalidGeometry { width: u32, height: u32 },

    #[error("image processing error: {0}")]
    ImageProcessing(String),

    #[error("embedded metadata not supported for format: {format}")]
    UnsupportedMetadataFormat { format: String },

    #[error("failed to parse image metadata: {0}")]
    MetadataParse(String),

    #[error("failed to fetch source object {bucket}/{key}: {reason}")]
    SourceFetch {
        bucket: String,
        key: String,
        reason: String,
    },

    #[error("failed to write destination object {bucket}/{key}: {reason}")]
    DestinationWrite {
        bucket: String,
        key: String,
        reason: String,
    },
}

impl PipelineError {
    /// The stage this error terminates the invocation in.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::UnknownFormat { .. } | PipelineError::UnsupportedFormat { .. } => {
                Stage::Validating
            }
            PipelineError::SourceFetch { .. } => Stage::Downloading,
            PipelineError::InvalidGeometry { .. } | PipelineError::ImageProcessing(_) => {
                Stage::Transforming
            }
            PipelineError::UnsupportedMetadataFormat { .. }
            | PipelineError::MetadataParse(_) => Stage::Annotating,
            PipelineError::DestinationWrite { .. } => Stage::Uploading,
        }
    }

    /// Short machine-readable code for structured logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            PipelineError::UnknownFormat { .. } => "UNKNOWN_FORMAT",
            PipelineError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            PipelineError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            PipelineError::ImageProcessing(_) => "IMAGE_PROCESSING_ERROR",
            PipelineError::UnsupportedMetadataFormat { .. } => "UNSUPPORTED_METADATA_FORMAT",
            PipelineError::MetadataParse(_) => "METADATA_PARSE_ERROR",
            PipelineError::SourceFetch { .. } => "SOURCE_FETCH_ERROR",
            PipelineError::DestinationWrite { .. } => "DESTINATION_WRITE_ERROR",
        }
    }
}
