//! Error types for fallible picker boundaries.

use thiserror::Error;

/// Picker errors.
///
/// Engine event handlers never return these; they are fail-soft and log
/// instead. Errors only surface from explicit boundaries such as config
/// loading, strict color parsing, and image extraction.
#[derive(Debug, Error)]
pub enum PickerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Image decode error: {0}")]
    ImageDecode(#[from] png::DecodingError),
    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Result type for picker operations.
pub type PickerResult<T> = Result<T, PickerError>;
