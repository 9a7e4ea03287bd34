//! Prediction model errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while loading or evaluating a prediction model.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Artifact missing or unreadable.
    #[error("Failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Artifact is not valid JSON or misses required members.
    #[error("Malformed model JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Artifact parses but its content is inconsistent.
    #[error("Invalid model artifact: {what}")]
    Format { what: String },

    /// Artifact uses a feature this engine does not evaluate.
    #[error("Unsupported model: {what}")]
    Unsupported { what: String },

    /// Feature names differ from the expected input layout.
    #[error("Feature schema mismatch at column {position}: expected '{expected}', model has '{found}'")]
    SchemaMismatch {
        position: usize,
        expected: String,
        found: String,
    },

    /// Counts disagree between the model and its inputs or outputs.
    #[error("Shape mismatch: {what} (expected {expected}, got {actual})")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Model produced NaN or infinity.
    #[error("Non-finite prediction for input row {row}")]
    NonFinite { row: usize },
}

impl ModelError {
    pub(crate) fn format(what: impl Into<String>) -> Self {
        Self::Format { what: what.into() }
    }

    pub(crate) fn unsupported(what: impl Into<String>) -> Self {
        Self::Unsupported { what: what.into() }
    }
}
