//! Error types for configuration, adapter and synthesis failures

use std::fmt;
use std::path::PathBuf;

/// Main error type for all quilting operations
#[derive(Debug)]
pub enum QuiltError {
    /// Failed to load the sample image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to save a synthesized image or visualization to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Pixel layout the engine does not handle
    ///
    /// Only 1, 3 and 4 channel images are accepted at the adapter boundary.
    UnsupportedFormat {
        /// Channel count of the rejected image
        channels: usize,
    },

    /// Synthesis parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// The distance surface has no candidate positions
    DegenerateDistanceMap {
        /// Rows of the offending surface
        rows: usize,
        /// Columns of the offending surface
        cols: usize,
    },

    /// Two matrices that must agree in shape do not
    DimensionMismatch {
        /// Name of the operation that detected the mismatch
        operation: &'static str,
        /// Shape the operation required
        expected: (usize, usize),
        /// Shape it received
        found: (usize, usize),
    },

    /// Numerical computation produced an invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for QuiltError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::UnsupportedFormat { channels } => {
                write!(
                    f,
                    "Unsupported pixel format with {channels} channels (expected 1, 3 or 4)"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::DegenerateDistanceMap { rows, cols } => {
                write!(
                    f,
                    "Distance map of size {rows}x{cols} has no candidate positions"
                )
            }
            Self::DimensionMismatch {
                operation,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Dimension mismatch in {operation}: expected {}x{}, found {}x{}",
                    expected.0, expected.1, found.0, found.1
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for QuiltError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for quilting results
pub type Result<T> = std::result::Result<T, QuiltError>;

impl From<image::ImageError> for QuiltError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for QuiltError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> QuiltError {
    QuiltError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a dimension mismatch error
pub const fn dimension_mismatch(
    operation: &'static str,
    expected: (usize, usize),
    found: (usize, usize),
) -> QuiltError {
    QuiltError::DimensionMismatch {
        operation,
        expected,
        found,
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> QuiltError {
    QuiltError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
