//! Response payload consumed by the graph renderer
//!
//! Field names here are read directly by the front end. `kind`, `origin`,
//! `total_propagation`, and `mainstream_coverage` are additions; nothing else
//! may be renamed.

use serde::{Deserialize, Serialize};
use storytrace_domain::{ColorBucket, EdgeKind};

/// Full trace response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsePayload {
    /// Nodes and links for the force-directed view
    pub graph: GraphPayload,
    /// Inferred origin and the path to the queried article
    pub origin_path: OriginPathPayload,
    /// Aggregate statistics
    pub summary: SummaryPayload,
}

impl ResponsePayload {
    /// Compact JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Indented JSON
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Graph section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphPayload {
    /// One entry per article, in graph insertion order
    pub nodes: Vec<NodePayload>,
    /// One entry per edge, in (source, target) order
    pub links: Vec<LinkPayload>,
}

/// A scored article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePayload {
    /// Canonical url
    pub id: String,
    /// Domain
    pub domain: String,
    /// Headline
    pub title: String,
    /// Byline, `null` when unknown
    pub author: Option<String>,
    /// `YYYY-MM-DD`, `null` when unknown
    pub date: Option<String>,
    /// Credibility score
    pub credibility: f64,
    /// Credibility flags
    pub flags: Vec<String>,
    /// Credibility bucket
    pub color: ColorBucket,
}

/// A propagation edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkPayload {
    /// Upstream url
    pub source: String,
    /// Downstream url
    pub target: String,
    /// Edge weight in (0, 1]
    pub weight: f64,
    /// Citation or similarity
    pub kind: EdgeKind,
}

/// Origin section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginPathPayload {
    /// Domain of the origin article
    pub origin_domain: String,
    /// Urls from origin to query, inclusive
    pub path: Vec<String>,
    /// Human-readable explanation
    pub summary: String,
    /// Origin url
    pub origin: String,
    /// Articles downstream of the origin
    pub total_propagation: usize,
    /// Mainstream outlets among them
    pub mainstream_coverage: usize,
}

/// Statistics section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryPayload {
    /// Node count
    pub total_articles: usize,
    /// Hops on the origin path
    pub path_length: usize,
    /// Mean credibility, two decimals
    pub avg_credibility: f64,
    /// Red-bucket node count
    pub high_risk_count: usize,
}
