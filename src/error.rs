use std::path::PathBuf;

use pixel_transform::{ParseMethodError, TransformError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    #[error("Unsupported pixelation method: {0}")]
    UnsupportedMethod(String),

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image encode error: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ParseMethodError> for PipelineError {
    fn from(e: ParseMethodError) -> Self {
        PipelineError::UnsupportedMethod(e.0)
    }
}

impl From<png::EncodingError> for PipelineError {
    fn from(e: png::EncodingError) -> Self {
        PipelineError::Encode(e.to_string())
    }
}
