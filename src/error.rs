//! Custom error types for patchlab.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the patchlab library.
#[derive(Error, Debug)]
pub enum Error {
    /// An image dimension cannot be tiled evenly by the requested window size.
    #[error("{size} {axis} is not evenly divisible by tile size {tile}")]
    Indivisible {
        axis: String,
        size: usize,
        tile: usize,
    },

    /// Shape mismatch in array operations.
    #[error("array shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    /// The scale ledger does not cover every sample in the batch.
    #[error("scale ledger holds {actual} entries but the batch needs {expected}")]
    LedgerMismatch { expected: usize, actual: usize },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Failed to save a rendered image file.
    #[error("failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to render a chart.
    #[error("failed to render chart to {path}: {message}")]
    Render { path: PathBuf, message: String },
}

/// Result type alias for patchlab operations.
pub type Result<T> = std::result::Result<T, Error>;
