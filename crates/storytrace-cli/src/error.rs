//! Error types for the CLI application.

use storytrace_credibility::ScoringError;
use storytrace_domain::ValidationError;
use storytrace_graph::GraphError;
use storytrace_report::TraceError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Rejected article record
    #[error("Invalid article: {0}")]
    Validation(#[from] ValidationError),

    /// Graph configuration or lookup error
    #[error("{0}")]
    Graph(#[from] GraphError),

    /// Scoring configuration error
    #[error("{0}")]
    Scoring(#[from] ScoringError),

    /// Trace pipeline error
    #[error("Trace failed: {0}")]
    Trace(#[from] TraceError),
}
