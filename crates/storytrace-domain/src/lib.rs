//! Storytrace Domain Layer
//!
//! This crate contains the data model shared by every other storytrace crate.
//! It performs no I/O and defines the value objects that flow through the
//! tracing pipeline.
//!
//! ## Key Concepts
//!
//! - **ArticleRecord**: Normalized, immutable metadata for one article
//! - **PropagationGraph**: Directed weighted graph of citation/similarity links
//! - **OriginResult**: The inferred origin and the path from it to the queried article
//! - **CredibilityScore**: A 0-10 heuristic rating with flags and a color bucket
//!
//! ## Ingestion boundary
//!
//! Scraper output arrives as [`RawArticle`] and is validated into an
//! [`ArticleRecord`]. Malformed records are rejected here with a
//! [`ValidationError`] so that graph construction never sees them.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod article;
pub mod credibility;
pub mod error;
pub mod graph;
pub mod origin;

// Re-exports for convenience
pub use article::{
    canonical_url, extract_domain, ArticleRecord, RawArticle, RawMetadata, RawSource,
};
pub use credibility::{ColorBucket, CredibilityScore, DomainReputation, ScoreDetails};
pub use error::ValidationError;
pub use graph::{EdgeKind, NodeIndex, PropagationEdge, PropagationGraph};
pub use origin::{OriginResult, PathKind};
