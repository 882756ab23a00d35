//! Propagation graph
//!
//! Directed, weighted, with at most one edge per ordered pair and no
//! self-loops. An edge `source -> target` means "target cites or is derived
//! from source". Adjacency lists stay sorted and edges iterate in
//! (source, target) order.

use crate::ArticleRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Position of a node in insertion order
pub type NodeIndex = usize;

/// Signal that produced an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Target links to source explicitly
    Citation,

    /// Target's text overlaps source's text
    Similarity,
}

impl EdgeKind {
    /// Lowercase name used in payloads and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Citation => "citation",
            EdgeKind::Similarity => "similarity",
        }
    }
}

/// A directed edge between two nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropagationEdge {
    /// Upstream node
    pub source: NodeIndex,

    /// Downstream node
    pub target: NodeIndex,

    /// Strength in (0, 1]; citations are exactly 1.0
    pub weight: f64,

    /// Signal that produced the edge
    pub kind: EdgeKind,
}

/// Directed weighted graph of articles keyed by URL
#[derive(Debug, Clone, Default)]
pub struct PropagationGraph {
    nodes: Vec<ArticleRecord>,
    index: HashMap<String, NodeIndex>,
    edges: BTreeMap<(NodeIndex, NodeIndex), PropagationEdge>,
    outgoing: Vec<Vec<NodeIndex>>,
    incoming: Vec<Vec<NodeIndex>>,
}

impl PropagationGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an article as a node
    ///
    /// Idempotent per URL: if the URL is already present the existing index is
    /// returned and the new record is discarded.
    pub fn add_node(&mut self, article: ArticleRecord) -> NodeIndex {
        if let Some(&idx) = self.index.get(article.url()) {
            return idx;
        }

        let idx = self.nodes.len();
        self.index.insert(article.url().to_string(), idx);
        self.nodes.push(article);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        idx
    }

    /// Add or merge a directed edge
    ///
    /// Returns `false` (and leaves the graph unchanged) for self-loops, unknown
    /// indices, and weights outside (0, 1]. An existing edge on the same
    /// ordered pair keeps the larger weight; a citation wins an exact tie.
    pub fn add_edge(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        weight: f64,
        kind: EdgeKind,
    ) -> bool {
        if source == target || source >= self.nodes.len() || target >= self.nodes.len() {
            return false;
        }
        if !(weight > 0.0 && weight <= 1.0) {
            return false;
        }

        let candidate = PropagationEdge {
            source,
            target,
            weight,
            kind,
        };

        match self.edges.get_mut(&(source, target)) {
            Some(existing) => {
                let stronger = weight > existing.weight
                    || (weight == existing.weight && kind == EdgeKind::Citation);
                if stronger {
                    *existing = candidate;
                }
            }
            None => {
                self.edges.insert((source, target), candidate);
                insert_sorted(&mut self.outgoing[source], target);
                insert_sorted(&mut self.incoming[target], source);
            }
        }

        true
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Article stored at `idx`
    pub fn node(&self, idx: NodeIndex) -> Option<&ArticleRecord> {
        self.nodes.get(idx)
    }

    /// Index of the node with exactly this URL
    pub fn index_of(&self, url: &str) -> Option<NodeIndex> {
        self.index.get(url).copied()
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &ArticleRecord)> {
        self.nodes.iter().enumerate()
    }

    /// Edges ordered by (source, target) index
    pub fn edges(&self) -> impl Iterator<Item = &PropagationEdge> {
        self.edges.values()
    }

    /// Edge on the ordered pair, if any
    pub fn edge(&self, source: NodeIndex, target: NodeIndex) -> Option<&PropagationEdge> {
        self.edges.get(&(source, target))
    }

    /// Whether an edge exists in either direction
    pub fn connected(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.edges.contains_key(&(a, b)) || self.edges.contains_key(&(b, a))
    }

    /// Downstream neighbors, ascending
    pub fn successors(&self, idx: NodeIndex) -> &[NodeIndex] {
        self.outgoing.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Upstream neighbors, ascending
    pub fn predecessors(&self, idx: NodeIndex) -> &[NodeIndex] {
        self.incoming.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of incoming edges
    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.predecessors(idx).len()
    }

    /// Number of outgoing edges
    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.successors(idx).len()
    }
}

fn insert_sorted(list: &mut Vec<NodeIndex>, value: NodeIndex) {
    if let Err(pos) = list.binary_search(&value) {
        list.insert(pos, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(path: &str) -> ArticleRecord {
        ArticleRecord::new(&format!("https://example.com/{}", path), path).unwrap()
    }

    fn three_nodes() -> PropagationGraph {
        let mut graph = PropagationGraph::new();
        graph.add_node(article("a"));
        graph.add_node(article("b"));
        graph.add_node(article("c"));
        graph
    }

    #[test]
    fn test_add_node_is_idempotent_per_url() {
        let mut graph = PropagationGraph::new();
        let first = graph.add_node(article("a"));
        let again = graph.add_node(article("a"));
        assert_eq!(first, again);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.index_of("https://example.com/a"), Some(0));
    }

    #[test]
    fn test_self_loops_rejected() {
        let mut graph = three_nodes();
        assert!(!graph.add_edge(1, 1, 1.0, EdgeKind::Citation));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_weight_bounds_enforced() {
        let mut graph = three_nodes();
        assert!(!graph.add_edge(0, 1, 0.0, EdgeKind::Similarity));
        assert!(!graph.add_edge(0, 1, 1.5, EdgeKind::Similarity));
        assert!(!graph.add_edge(0, 1, f64::NAN, EdgeKind::Similarity));
        assert!(!graph.add_edge(0, 7, 0.5, EdgeKind::Similarity));
        assert!(graph.add_edge(0, 1, 0.5, EdgeKind::Similarity));
    }

    #[test]
    fn test_duplicate_pair_keeps_max_weight() {
        let mut graph = three_nodes();
        graph.add_edge(0, 1, 0.4, EdgeKind::Similarity);
        graph.add_edge(0, 1, 0.2, EdgeKind::Similarity);
        assert_eq!(graph.edge(0, 1).unwrap().weight, 0.4);

        graph.add_edge(0, 1, 1.0, EdgeKind::Citation);
        let edge = graph.edge(0, 1).unwrap();
        assert_eq!(edge.weight, 1.0);
        assert_eq!(edge.kind, EdgeKind::Citation);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.out_degree(0), 1);
    }

    #[test]
    fn test_reverse_pair_is_a_separate_edge() {
        let mut graph = three_nodes();
        graph.add_edge(0, 1, 1.0, EdgeKind::Citation);
        graph.add_edge(1, 0, 1.0, EdgeKind::Citation);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.connected(0, 1));
        assert!(!graph.connected(0, 2));
    }

    #[test]
    fn test_adjacency_sorted() {
        let mut graph = three_nodes();
        graph.add_edge(0, 2, 1.0, EdgeKind::Citation);
        graph.add_edge(0, 1, 1.0, EdgeKind::Citation);
        assert_eq!(graph.successors(0), &[1, 2]);
        assert_eq!(graph.predecessors(2), &[0]);
        assert_eq!(graph.in_degree(0), 0);

        let order: Vec<_> = graph.edges().map(|e| (e.source, e.target)).collect();
        assert_eq!(order, vec![(0, 1), (0, 2)]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: whatever is inserted, stored edges respect the graph invariants
        #[test]
        fn test_edge_invariants(
            inserts in prop::collection::vec((0usize..6, 0usize..6, -0.5f64..1.5, any::<bool>()), 0..40)
        ) {
            let mut graph = PropagationGraph::new();
            for i in 0..5 {
                graph.add_node(
                    ArticleRecord::new(&format!("https://example.com/{}", i), "t").unwrap()
                );
            }

            for (s, t, w, citation) in inserts {
                let kind = if citation { EdgeKind::Citation } else { EdgeKind::Similarity };
                graph.add_edge(s, t, w, kind);
            }

            for edge in graph.edges() {
                prop_assert!(edge.source != edge.target);
                prop_assert!(edge.weight > 0.0 && edge.weight <= 1.0);
                prop_assert!(graph.successors(edge.source).contains(&edge.target));
                prop_assert!(graph.predecessors(edge.target).contains(&edge.source));
            }

            let degree_total: usize = (0..graph.node_count()).map(|i| graph.out_degree(i)).sum();
            prop_assert_eq!(degree_total, graph.edge_count());
        }
    }
}
