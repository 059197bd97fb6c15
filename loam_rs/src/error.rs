//! Error types for loam_rs operations.

use loam_core::LoamCoreError;
use loam_io::LoamIoError;
use thiserror::Error;

/// Errors that can occur while generating terrain.
#[derive(Error, Debug)]
pub enum LoamError {
    /// The generator is not set up to run (bad parameters, missing input).
    #[error("configuration error: {message}")]
    Configuration {
        /// What is missing or wrong.
        message: String,
    },

    /// Error from the core algorithms.
    #[error(transparent)]
    Core(#[from] LoamCoreError),

    /// Error from image, profile or export I/O.
    #[error(transparent)]
    Io(#[from] LoamIoError),
}

impl LoamError {
    /// Shorthand for [`LoamError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        LoamError::Configuration {
            message: message.into(),
        }
    }
}

/// Result type alias for loam_rs operations.
pub type Result<T> = std::result::Result<T, LoamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoamError::configuration("no source image");
        assert_eq!(err.to_string(), "configuration error: no source image");

        let err: LoamError = LoamCoreError::ZeroMaxHeight.into();
        assert_eq!(err.to_string(), "max height must be greater than zero");
    }

    #[test]
    fn test_from_io_error() {
        let err: LoamError = LoamIoError::invalid_profile("threshold").into();
        assert!(matches!(err, LoamError::Io(LoamIoError::InvalidProfile { .. })));
    }
}
