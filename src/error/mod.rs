//! Error handling for the sanctions pipeline.

use std::io;

use arrow::error::ArrowError;

/// Errors that abort a pipeline run
///
/// Malformed dates and lookup misses are not errors; they degrade to
/// missing values during normalization and table building.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Connection or query failure against the entity store
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Error assembling an Arrow batch or writing it as CSV
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error converting rows into a record batch
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_arrow::Error),

    /// Error encoding the metadata document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error creating or writing an output file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
