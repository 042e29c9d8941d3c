//! Error types for review analysis pipelines

use std::io;
use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for pipeline operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Step kind name that is not one of preprocess, compose or analyze
    #[error("Invalid step kind: {0}")]
    InvalidKind(String),

    /// Column missing from the dataset
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Two columns with the same name in one dataset
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// Column length does not agree with the dataset row count
    #[error("Length mismatch for column '{column}': expected {expected} rows, got {actual}")]
    LengthMismatch {
        /// Name of the offending column
        column: String,
        /// Row count of the dataset
        expected: usize,
        /// Length of the column
        actual: usize,
    },

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Stepping or running with no pipeline while the orchestrator requires one
    #[error("No pipeline is set")]
    MissingPipeline,

    /// A step's function failed
    #[error("Step '{id}' failed: {source}")]
    Step {
        /// Identifier of the failing step
        id: String,
        /// Error raised by the step function
        #[source]
        source: anyhow::Error,
    },

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
