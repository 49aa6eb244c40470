//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request timed out; the server may simply be slow or cold-starting
    #[error("Request timed out; the server may still be processing")]
    Timeout,

    /// Network-level failure
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with an error body
    #[error("Server error: {0}")]
    Server(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Task is not tracked in the local session
    #[error("Unknown task '{0}'. Upload it first or check the id.")]
    UnknownTask(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// CSV writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<reqwest::Error> for CliError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CliError::Timeout
        } else {
            CliError::Network(e.to_string())
        }
    }
}
