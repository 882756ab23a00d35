//! Origin tracing results

use serde::{Deserialize, Serialize};

/// How the path from origin to query was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    /// Followed edges in their propagation direction
    Directed,

    /// Fell back to the undirected projection of the graph
    Undirected,

    /// No connection; the path is the query node alone
    Isolated,
}

/// The inferred origin of a story and the path to the queried article
///
/// `path` runs from the origin to the query node, both inclusive, and never
/// repeats a node. Its last element is always the query URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginResult {
    /// URL of the origin node
    pub origin: String,

    /// Domain of the origin node
    pub origin_domain: String,

    /// Node URLs from origin to query
    pub path: Vec<String>,

    /// Human-readable explanation
    pub summary: String,

    /// How `path` was obtained
    pub path_kind: PathKind,

    /// Nodes reachable forward from the origin
    pub reach: usize,

    /// How many of `reach` are mainstream outlets
    pub mainstream_reach: usize,
}

impl OriginResult {
    /// Number of edges on the path
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// The queried URL (last path element)
    pub fn query(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    /// Whether the path visits every node at most once
    pub fn is_simple_path(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.path.iter().all(|url| seen.insert(url))
    }
}
