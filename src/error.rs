//! Error types for the beam optimizer

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for optimization runs
#[derive(Error, Debug)]
pub enum OptimizerError {
    /// No optimization is possible with the current setup (e.g. an empty catalog)
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to read beam library '{path}': {source}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Beam library is not valid JSON: {0}")]
    CatalogFormat(#[from] serde_json::Error),

    #[error("Beam library entry {index} is invalid: {reason}")]
    InvalidCatalogEntry { index: usize, reason: String },
}

/// Result type for optimizer operations
pub type OptimizerResult<T> = Result<T, OptimizerError>;
