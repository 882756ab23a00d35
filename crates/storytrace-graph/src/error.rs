//! Graph and tracer error types

use thiserror::Error;

/// Errors that can occur while building or tracing a graph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The requested URL is not a node of the graph
    #[error("URL not found in graph: {url}")]
    NotFound {
        /// The URL that was looked up
        url: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
