//! Error types for the quad-eval library.

use thiserror::Error;

/// Result type for quad-eval operations.
pub type Result<T> = std::result::Result<T, QuadEvalError>;

/// Error types that can occur during detection evaluation.
#[derive(Error, Debug)]
pub enum QuadEvalError {
    /// An annotation filename does not match any recognized naming convention.
    ///
    /// Filenames carry the crop geometry (image id, anchor, rotation angle),
    /// so an unrecognized name must be surfaced to the caller rather than
    /// silently skipped: a dropped file corrupts recall counts.
    #[error("unrecognized annotation filename: {name}")]
    CropReferenceParse { name: String },

    /// A line inside an annotation file does not parse into exactly 8 numeric tokens.
    #[error("{file}:{line}: malformed annotation: {reason}")]
    MalformedAnnotation {
        file: String,
        line: usize,
        reason: String,
    },

    /// Invalid oriented box data.
    #[error("invalid oriented box: {0}")]
    InvalidBox(String),

    /// Invalid IoU or confidence threshold.
    #[error("invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Error during I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error during JSON serialization of a report.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
