//! Error types for the gridmc crate

use thiserror::Error;

/// Main error type for the gridmc crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid direction '{input}' (expected 'up', 'down', 'left', or 'right')")]
    ParseDirection { input: String },

    #[error("cell ({row}, {col}) is out of bounds (coordinates must be 0-9)")]
    InvalidCell { row: usize, col: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
