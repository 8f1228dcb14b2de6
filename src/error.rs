//! Common error types for the detection pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Detection error types
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("Image not found: {0}")]
    ImageNotFound(PathBuf),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Empty image: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DetectError>;
