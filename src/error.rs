//! Error types for the benchmark report generator
//!
//! Every stage aborts the run on the first failure; the variants say which
//! input was wrong so the message is actionable without a backtrace.

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Report generator error types
#[derive(Error, Debug)]
pub enum Error {
    /// Two timing rows for the same method and learning rate
    #[error("Duplicate timing row for method '{method}' at lr {lr}\nEach (method, lr) pair must appear exactly once in the timing table")]
    DuplicateTiming {
        /// Method name of the duplicated row
        method: String,
        /// Learning rate of the duplicated row
        lr: f64,
    },

    /// No timing row for a method and learning rate the report needs
    #[error("No timing row for method '{method}' at lr {lr}")]
    MissingTiming {
        /// Method name that was looked up
        method: String,
        /// Learning rate that was looked up
        lr: f64,
    },

    /// Aggregation over a group with no rows
    #[error("Empty group: {0}")]
    EmptyGroup(String),

    /// Table storage error (schema or column type mismatch)
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Invalid input or configuration
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Chart drawing or PNG encoding failed
    #[error("Render error: {0}")]
    Render(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Arrow/CSV error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl<E> From<DrawingAreaErrorKind<E>> for Error
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        Self::Render(err.to_string())
    }
}
