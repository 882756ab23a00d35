//! Error types for assembly and the end-to-end pipeline

use storytrace_domain::ValidationError;
use storytrace_graph::GraphError;
use thiserror::Error;

/// Internal invariant violations found while joining graph, path, and scores
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    /// A graph node was never scored
    #[error("No credibility score for node: {url}")]
    MissingScore {
        /// Node url
        url: String,
    },

    /// The origin path names a url that is not a graph node
    #[error("Origin path references unknown node: {url}")]
    UnknownPathNode {
        /// Offending url
        url: String,
    },
}

/// Errors that end a trace request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// Empty or malformed article input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Query url not in the graph, or invalid graph configuration
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Graph, path, and scores disagree
    #[error("Assembly error: {0}")]
    Assembly(#[from] AssemblyError),
}
