//! Storytrace Report
//!
//! Joins the propagation graph, the inferred origin, and per-article
//! credibility scores into the JSON payload read by the graph renderer.
//!
//! # Architecture
//!
//! ```text
//! Articles → GraphBuilder → OriginTracer ┐
//!         └→ CredibilityScorer ──────────┴→ ResultAssembler → ResponsePayload
//! ```
//!
//! # Example Usage
//!
//! ```
//! use storytrace_credibility::{CredibilityScorer, ScoringConfig};
//! use storytrace_domain::ArticleRecord;
//! use storytrace_graph::{GraphConfig, TracerConfig};
//! use storytrace_report::TracePipeline;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scorer = CredibilityScorer::new(ScoringConfig::default())?;
//! let pipeline = TracePipeline::new(GraphConfig::default(), TracerConfig::default(), scorer)?;
//!
//! let articles = vec![
//!     ArticleRecord::new("https://relay.com/b", "Relay")?.with_cited_url("https://origin.com/a"),
//!     ArticleRecord::new("https://origin.com/a", "Origin")?,
//! ];
//! let payload = pipeline.run(&articles, None)?;
//!
//! assert_eq!(payload.origin_path.origin_domain, "origin.com");
//! assert_eq!(payload.summary.path_length, 1);
//! println!("{}", payload.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod assembler;
mod error;
mod payload;
mod pipeline;

pub use assembler::ResultAssembler;
pub use error::{AssemblyError, TraceError};
pub use payload::{
    GraphPayload, LinkPayload, NodePayload, OriginPathPayload, ResponsePayload, SummaryPayload,
};
pub use pipeline::TracePipeline;
