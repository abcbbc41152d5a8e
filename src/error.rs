//! Error types for qrmark operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using qrmark's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrmark operations
#[derive(Error, Debug)]
pub enum Error {
    /// Payload validation failed: nothing to encode
    #[error("Payload is empty, nothing to encode")]
    EmptyPayload,

    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// Logo file could not be read or decoded
    #[error("Failed to decode logo image: {0}")]
    LogoDecode(String),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Refusing to replace an existing output file
    #[error("Output file already exists: {}", .0.display())]
    OutputExists(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

// Implement From conversions for common error types

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", e))
    }
}
