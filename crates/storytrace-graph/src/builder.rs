//! Propagation graph construction

use crate::similarity::{jaccard, tokenize};
use crate::GraphConfig;
use rayon::prelude::*;
use std::collections::BTreeSet;
use storytrace_domain::{ArticleRecord, EdgeKind, NodeIndex, PropagationGraph};
use tracing::{debug, info};

/// Weight of an explicit citation edge
pub const CITATION_WEIGHT: f64 = 1.0;

/// Builds a [`PropagationGraph`] from article records
///
/// Edges come from two signals:
/// 1. Explicit citations: if B links to A, edge A -> B with weight 1.0
/// 2. Text similarity: for pairs with no citation either way, a Jaccard score
///    above the threshold adds an edge from the earlier article to the later
///    one. Equal or missing dates fall back to input order.
pub struct GraphBuilder {
    config: GraphConfig,
}

impl GraphBuilder {
    /// Create a new builder with the given configuration
    pub fn new(config: GraphConfig) -> Self {
        Self { config }
    }

    /// Create a builder with default configuration
    pub fn default_config() -> Self {
        Self::new(GraphConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Build the graph
    ///
    /// Fewer than two distinct articles produce a degenerate graph (zero or one
    /// node, no edges); that is a valid result, not an error. Repeated URLs keep
    /// the first record seen.
    pub fn build(&self, articles: &[ArticleRecord]) -> PropagationGraph {
        let mut graph = PropagationGraph::new();

        for article in articles {
            if graph.index_of(article.url()).is_some() {
                debug!("Skipping duplicate article {}", article.url());
                continue;
            }
            graph.add_node(article.clone());
        }

        if graph.node_count() < 2 {
            info!(
                "Degenerate graph: {} node(s), nothing to link",
                graph.node_count()
            );
            return graph;
        }

        let citations = self.add_citation_edges(&mut graph);
        let similarities = self.add_similarity_edges(&mut graph);

        info!(
            "Built propagation graph: {} nodes, {} citation edge(s), {} similarity edge(s)",
            graph.node_count(),
            citations,
            similarities
        );

        graph
    }

    fn add_citation_edges(&self, graph: &mut PropagationGraph) -> usize {
        let mut pairs = Vec::new();
        for (target, citing) in graph.nodes() {
            for (source, cited) in graph.nodes() {
                if source != target && citing.cites(cited.url()) {
                    pairs.push((source, target));
                }
            }
        }

        for &(source, target) in &pairs {
            debug!("Citation edge {} -> {}", source, target);
            graph.add_edge(source, target, CITATION_WEIGHT, EdgeKind::Citation);
        }
        pairs.len()
    }

    fn add_similarity_edges(&self, graph: &mut PropagationGraph) -> usize {
        let n = graph.node_count();
        let profiles: Vec<BTreeSet<String>> = graph
            .nodes()
            .map(|(_, article)| self.token_set(article))
            .collect();

        let pairs: Vec<(NodeIndex, NodeIndex)> = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .filter(|&(i, j)| !graph.connected(i, j))
            .collect();

        let threshold = self.config.similarity_threshold;
        let linked: Vec<(NodeIndex, NodeIndex, f64)> = pairs
            .par_iter()
            .map(|&(i, j)| (i, j, jaccard(&profiles[i], &profiles[j])))
            .filter(|&(_, _, score)| score > threshold)
            .collect();

        for &(i, j, score) in &linked {
            let (source, target) = orient(graph, i, j);
            debug!(
                "Similarity edge {} -> {} (weight {:.3})",
                source, target, score
            );
            graph.add_edge(source, target, score, EdgeKind::Similarity);
        }
        linked.len()
    }

    fn token_set(&self, article: &ArticleRecord) -> BTreeSet<String> {
        let mut tokens = tokenize(article.title(), self.config.min_token_len);
        if self.config.include_content {
            tokens.extend(tokenize(article.content_excerpt(), self.config.min_token_len));
        }
        tokens
    }
}

/// Direct a similarity edge between `first` and `second` (`first` seen earlier)
///
/// Content flows forward in time, so the earlier publication is the source.
/// Equal or missing dates keep input order.
fn orient(graph: &PropagationGraph, first: NodeIndex, second: NodeIndex) -> (NodeIndex, NodeIndex) {
    let first_date = graph.node(first).and_then(ArticleRecord::publish_date);
    let second_date = graph.node(second).and_then(ArticleRecord::publish_date);

    match (first_date, second_date) {
        (Some(a), Some(b)) if b < a => (second, first),
        _ => (first, second),
    }
}
