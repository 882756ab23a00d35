//! Storytrace Graph
//!
//! Builds the propagation graph from article records and traces the likely
//! origin of a story through it.
//!
//! The crate provides:
//! - Graph construction from explicit citations and text similarity
//! - Origin selection by earliest publish date with deterministic tie-breaks
//! - Shortest-path extraction with an undirected fallback
//! - Templated, human-readable summaries
//!
//! # Examples
//!
//! ```
//! use storytrace_domain::ArticleRecord;
//! use storytrace_graph::{GraphBuilder, OriginTracer};
//!
//! let a = ArticleRecord::new("https://origin.com/a", "Dam breach floods valley").unwrap();
//! let b = ArticleRecord::new("https://relay.com/b", "Report: dam breach")
//!     .unwrap()
//!     .with_cited_url("https://origin.com/a");
//!
//! let graph = GraphBuilder::default_config().build(&[a, b]);
//! let result = OriginTracer::default_config()
//!     .trace(&graph, "https://relay.com/b")
//!     .unwrap();
//!
//! assert_eq!(result.origin_domain, "origin.com");
//! assert_eq!(result.path.len(), 2);
//! ```

#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod similarity;
mod summary;
mod tracer;
pub mod traversal;

pub use builder::GraphBuilder;
pub use config::{GraphConfig, TracerConfig};
pub use error::GraphError;
pub use similarity::{jaccard, tokenize};
pub use tracer::{extract_path, OriginTracer};
