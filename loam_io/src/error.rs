//! Error types for loam_io operations.
//!
//! Covers image decoding, profile persistence and mesh export failures.

use std::path::PathBuf;

use loam_core::LoamCoreError;
use thiserror::Error;

/// Errors that can occur during loam_io operations.
#[derive(Error, Debug)]
pub enum LoamIoError {
    /// Error from the core algorithms.
    #[error("core error: {0}")]
    Core(#[from] LoamCoreError),

    /// I/O error while reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source image could not be decoded.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Profile (de)serialization failed.
    #[error("profile serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A profile was loaded or saved with out-of-range parameters.
    #[error("invalid profile: {message}")]
    InvalidProfile {
        /// Which parameter is wrong and why.
        message: String,
    },

    /// Pixel buffer does not match the stated image size.
    #[error("pixel buffer holds {got} values, expected {expected} for a {width}x{height} RGB image")]
    PixelBufferMismatch {
        /// Image width.
        width: usize,
        /// Image height.
        height: usize,
        /// Expected number of floats (`width * height * 3`).
        expected: usize,
        /// Actual number of floats.
        got: usize,
    },

    /// No file extension to pick an export format from.
    #[error("cannot infer export format for {path:?}")]
    UnknownFormat {
        /// Path that was given.
        path: PathBuf,
    },
}

impl LoamIoError {
    /// Shorthand for [`LoamIoError::InvalidProfile`].
    pub fn invalid_profile(message: impl Into<String>) -> Self {
        LoamIoError::InvalidProfile {
            message: message.into(),
        }
    }
}

/// Result type alias for loam_io operations.
pub type Result<T> = std::result::Result<T, LoamIoError>;
