//! Error types for loam_core operations.

use thiserror::Error;

/// Errors that can occur during loam_core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoamCoreError {
    /// A field coordinate was outside `[0, dim)` on some axis.
    #[error("index {index} out of range for axis {axis} with size {size}")]
    IndexOutOfRange {
        /// Axis name (`"i"`, `"j"` or `"k"`).
        axis: &'static str,
        /// The offending coordinate.
        index: usize,
        /// The size of that axis.
        size: usize,
    },

    /// A value buffer did not match the declared field shape.
    #[error("field shape mismatch: expected {expected} values, got {got}")]
    DimensionMismatch {
        /// Number of values implied by the dimensions.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// The maximum height of an extrusion must be positive.
    #[error("max height must be greater than zero")]
    ZeroMaxHeight,

    /// A gradient needs at least one color key.
    #[error("gradient has no color keys")]
    EmptyGradient,
}

/// Result type alias for loam_core operations.
pub type Result<T> = core::result::Result<T, LoamCoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoamCoreError::IndexOutOfRange {
            axis: "j",
            index: 4,
            size: 4,
        };
        assert_eq!(format!("{}", err), "index 4 out of range for axis j with size 4");

        let err = LoamCoreError::DimensionMismatch {
            expected: 12,
            got: 10,
        };
        assert_eq!(
            format!("{}", err),
            "field shape mismatch: expected 12 values, got 10"
        );

        assert_eq!(
            format!("{}", LoamCoreError::ZeroMaxHeight),
            "max height must be greater than zero"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(LoamCoreError::EmptyGradient, LoamCoreError::EmptyGradient);
        assert_ne!(LoamCoreError::EmptyGradient, LoamCoreError::ZeroMaxHeight);
    }
}
