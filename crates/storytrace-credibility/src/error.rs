//! Error types for credibility scoring

use thiserror::Error;

/// Errors that can occur while configuring a scorer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A configured pattern is not a valid regular expression
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Compiler message
        reason: String,
    },
}
