//! Error types and coordinate context for extraction, fitting and synthesis

use crate::spatial::{Coordinate, Dimensions};
use std::fmt;
use std::path::PathBuf;

/// Main error type for all pixel statistics operations
#[derive(Debug)]
pub enum SynthesisError {
    /// Coordinate lies outside the declared image dimensions
    OutOfBounds {
        /// Requested coordinate
        coordinate: Coordinate,
        /// Dimensions it was checked against
        dimensions: Dimensions,
    },

    /// An empty sample reached the distribution fitter
    InsufficientData {
        /// Coordinate whose sample was empty, when known
        coordinate: Option<Coordinate>,
    },

    /// A pixel model was sampled before it was fitted
    ModelNotFit {
        /// Coordinate of the unfitted model
        coordinate: Coordinate,
    },

    /// A single corpus file could not be decoded as an image
    ///
    /// Extraction recovers from this locally by skipping the file
    DecodeFailure {
        /// Path to the file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a synthesized image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
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

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                coordinate,
                dimensions,
            } => {
                write!(
                    f,
                    "Coordinate {coordinate} is out of bounds for image size {dimensions}"
                )
            }
            Self::InsufficientData { coordinate } => match coordinate {
                Some(coordinate) => {
                    write!(f, "No intensity samples available at {coordinate}")
                }
                None => write!(f, "No intensity samples available"),
            },
            Self::ModelNotFit { coordinate } => {
                write!(f, "Pixel model at {coordinate} was sampled before fitting")
            }
            Self::DecodeFailure { path, source } => {
                write!(f, "Failed to decode image '{}': {source}", path.display())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
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
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for SynthesisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DecodeFailure { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for pixel statistics results
pub type Result<T> = std::result::Result<T, SynthesisError>;

/// Attaches the coordinate being processed to errors raised below the per-pixel layer
pub trait WithCoordinate<T> {
    /// Fill in the coordinate of coordinate-aware errors
    ///
    /// # Errors
    ///
    /// Propagates the original error with the coordinate applied
    fn at_coordinate(self, coordinate: Coordinate) -> Result<T>;
}

impl<T, E> WithCoordinate<T> for std::result::Result<T, E>
where
    E: Into<SynthesisError>,
{
    fn at_coordinate(self, coordinate: Coordinate) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only errors that describe a single pixel carry a coordinate
            match &mut error {
                SynthesisError::InsufficientData { coordinate: slot } => {
                    *slot = Some(coordinate);
                }
                SynthesisError::ModelNotFit { coordinate: slot } => {
                    *slot = coordinate;
                }
                _ => {}
            }
            error
        })
    }
}

impl From<image::ImageError> for SynthesisError {
    fn from(err: image::ImageError) -> Self {
        Self::DecodeFailure {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for SynthesisError {
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
) -> SynthesisError {
    SynthesisError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> SynthesisError {
    SynthesisError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
