//! Origin tracing

use crate::summary::{render, SummaryFacts};
use crate::traversal::{ancestors, descendants, shortest_path, shortest_undirected_path};
use crate::{GraphError, TracerConfig};
use chrono::NaiveDate;
use std::cmp::Reverse;
use std::collections::BTreeSet;
use storytrace_domain::{
    canonical_url, ArticleRecord, EdgeKind, NodeIndex, OriginResult, PathKind, PropagationGraph,
};
use tracing::{debug, info};

/// Infers the origin of a story from a propagation graph
///
/// The origin is the earliest-published ancestor of the queried article. Ties
/// go to the node with the highest out-degree, then the smallest domain, then
/// the smallest URL. An article with no ancestors is its own origin.
pub struct OriginTracer {
    config: TracerConfig,
}

impl OriginTracer {
    /// Create a new tracer with the given configuration
    pub fn new(config: TracerConfig) -> Self {
        Self { config }
    }

    /// Create a tracer with default configuration
    pub fn default_config() -> Self {
        Self::new(TracerConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    /// Trace the origin of `query_url`
    ///
    /// # Errors
    ///
    /// [`GraphError::NotFound`] if `query_url` is not a node, either verbatim
    /// or in canonical form.
    pub fn trace(
        &self,
        graph: &PropagationGraph,
        query_url: &str,
    ) -> Result<OriginResult, GraphError> {
        let query = resolve(graph, query_url)?;
        let upstream = ancestors(graph, query);
        let origin = select_origin(graph, &upstream).unwrap_or(query);

        debug!(
            "Origin candidates for {}: {} ancestor(s), selected node {}",
            query_url,
            upstream.len(),
            origin
        );

        let result = self.describe(graph, origin, query);
        info!(
            "Traced {} to {} ({} hop(s), {:?})",
            query_url,
            result.origin_domain,
            result.hops(),
            result.path_kind
        );
        Ok(result)
    }

    /// Describe the path from a caller-chosen origin to `query_url`
    ///
    /// Unlike [`trace`](Self::trace) the origin is not inferred, so the
    /// undirected and isolated fallbacks can apply.
    pub fn trace_from(
        &self,
        graph: &PropagationGraph,
        origin_url: &str,
        query_url: &str,
    ) -> Result<OriginResult, GraphError> {
        let origin = resolve(graph, origin_url)?;
        let query = resolve(graph, query_url)?;
        Ok(self.describe(graph, origin, query))
    }

    fn describe(&self, graph: &PropagationGraph, candidate: NodeIndex, query: NodeIndex) -> OriginResult {
        let (path, kind) = extract_path(graph, candidate, query);
        let origin = path.first().copied().unwrap_or(query);

        let downstream = descendants(graph, origin);
        let mainstream = downstream
            .iter()
            .filter_map(|&idx| graph.node(idx))
            .filter(|article| self.config.is_mainstream(article.domain()))
            .count();

        let edge_kinds: Vec<EdgeKind> = path
            .windows(2)
            .filter_map(|pair| {
                graph
                    .edge(pair[0], pair[1])
                    .or_else(|| graph.edge(pair[1], pair[0]))
                    .map(|edge| edge.kind)
            })
            .collect();

        let domain_of = |idx: NodeIndex| graph.node(idx).map_or("", ArticleRecord::domain);
        let url_of = |idx: NodeIndex| graph.node(idx).map_or("", ArticleRecord::url).to_string();

        let summary = render(&SummaryFacts {
            node_count: graph.node_count(),
            origin_domain: domain_of(origin),
            query_domain: domain_of(query),
            unreachable_domain: (kind == PathKind::Isolated).then(|| domain_of(candidate)),
            hops: path.len().saturating_sub(1),
            kind,
            edge_kinds: &edge_kinds,
            reach: downstream.len(),
            mainstream,
        });

        OriginResult {
            origin: url_of(origin),
            origin_domain: domain_of(origin).to_string(),
            path: path.iter().map(|&idx| url_of(idx)).collect(),
            summary,
            path_kind: kind,
            reach: downstream.len(),
            mainstream_reach: mainstream,
        }
    }
}

/// Shortest path from `origin` to `query`
///
/// Tries directed edges first, then the undirected projection. If the two are
/// disconnected the path is `[query]` with [`PathKind::Isolated`].
pub fn extract_path(
    graph: &PropagationGraph,
    origin: NodeIndex,
    query: NodeIndex,
) -> (Vec<NodeIndex>, PathKind) {
    if let Some(path) = shortest_path(graph, origin, query) {
        return (path, PathKind::Directed);
    }
    if let Some(path) = shortest_undirected_path(graph, origin, query) {
        return (path, PathKind::Undirected);
    }
    (vec![query], PathKind::Isolated)
}

fn resolve(graph: &PropagationGraph, url: &str) -> Result<NodeIndex, GraphError> {
    graph
        .index_of(url)
        .or_else(|| {
            canonical_url(url)
                .ok()
                .and_then(|canonical| graph.index_of(&canonical))
        })
        .ok_or_else(|| GraphError::NotFound {
            url: url.to_string(),
        })
}

fn select_origin(graph: &PropagationGraph, candidates: &BTreeSet<NodeIndex>) -> Option<NodeIndex> {
    candidates
        .iter()
        .copied()
        .min_by_key(|&idx| origin_key(graph, idx))
}

/// Sort key: known dates before missing ones, earliest first, then highest
/// out-degree, smallest domain, smallest URL
fn origin_key(
    graph: &PropagationGraph,
    idx: NodeIndex,
) -> (bool, Option<NaiveDate>, Reverse<usize>, &str, &str) {
    let article = graph.node(idx);
    let date = article.and_then(ArticleRecord::publish_date);
    (
        date.is_none(),
        date,
        Reverse(graph.out_degree(idx)),
        article.map_or("", ArticleRecord::domain),
        article.map_or("", ArticleRecord::url),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphBuilder;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn article(url: &str, title: &str) -> ArticleRecord {
        ArticleRecord::new(url, title).unwrap()
    }

    fn chain() -> PropagationGraph {
        let a = article("https://a.com/1", "Reservoir levels alarming")
            .with_publish_date(date(2024, 5, 1));
        let b = article("https://b.com/2", "Senate budget passes")
            .with_publish_date(date(2024, 5, 2))
            .with_cited_url("https://a.com/1");
        let c = article("https://c.com/3", "Weekend weather outlook")
            .with_publish_date(date(2024, 5, 3))
            .with_cited_url("https://b.com/2");
        GraphBuilder::default_config().build(&[a, b, c])
    }

    #[test]
    fn test_three_article_chain() {
        let graph = chain();
        let result = OriginTracer::default_config()
            .trace(&graph, "https://c.com/3")
            .unwrap();

        assert_eq!(result.origin, "https://a.com/1");
        assert_eq!(result.origin_domain, "a.com");
        assert_eq!(
            result.path,
            vec!["https://a.com/1", "https://b.com/2", "https://c.com/3"]
        );
        assert_eq!(result.hops(), 2);
        assert_eq!(result.path_kind, PathKind::Directed);
        assert_eq!(
            result.summary,
            "Story traced to a.com across 2 hops of citation links."
        );
    }

    #[test]
    fn test_query_not_found() {
        let graph = chain();
        let err = OriginTracer::default_config()
            .trace(&graph, "https://missing.com/x")
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::NotFound {
                url: "https://missing.com/x".to_string()
            }
        );
    }

    #[test]
    fn test_query_lookup_is_canonical() {
        let graph = chain();
        let result = OriginTracer::default_config()
            .trace(&graph, "https://C.COM/3#comments")
            .unwrap();
        assert_eq!(result.query(), Some("https://c.com/3"));
    }

    #[test]
    fn test_single_node_graph() {
        let graph = GraphBuilder::default_config().build(&[article("https://solo.com/1", "Alone")]);
        let result = OriginTracer::default_config()
            .trace(&graph, "https://solo.com/1")
            .unwrap();

        assert_eq!(result.origin, "https://solo.com/1");
        assert_eq!(result.path, vec!["https://solo.com/1"]);
        assert!(result.summary.contains("No propagation detected"));
    }

    #[test]
    fn test_query_without_ancestors_is_own_origin() {
        let graph = chain();
        let result = OriginTracer::default_config()
            .trace(&graph, "https://a.com/1")
            .unwrap();

        assert_eq!(result.origin, "https://a.com/1");
        assert_eq!(result.path, vec!["https://a.com/1"]);
        assert_eq!(result.reach, 2);
        assert!(result.summary.contains("appears to be the origin"));
    }

    #[test]
    fn test_tie_break_prefers_out_degree_then_domain() {
        let zeta = article("https://zeta.com/r", "Harbor crane collapse")
            .with_publish_date(date(2024, 1, 1));
        let alpha = article("https://alpha.com/r", "Orchard frost losses")
            .with_publish_date(date(2024, 1, 1));
        let query = article("https://q.com/q", "Council zoning vote")
            .with_publish_date(date(2024, 1, 5))
            .with_cited_url("https://zeta.com/r")
            .with_cited_url("https://alpha.com/r");
        let extra = article("https://x.com/x", "Museum reopening plans")
            .with_publish_date(date(2024, 1, 6))
            .with_cited_url("https://zeta.com/r");

        let tracer = OriginTracer::default_config();

        let graph = GraphBuilder::default_config()
            .build(&[zeta.clone(), alpha.clone(), query.clone(), extra]);
        let result = tracer.trace(&graph, "https://q.com/q").unwrap();
        assert_eq!(result.origin_domain, "zeta.com");

        let graph = GraphBuilder::default_config().build(&[zeta, alpha, query]);
        let result = tracer.trace(&graph, "https://q.com/q").unwrap();
        assert_eq!(result.origin_domain, "alpha.com");
    }

    #[test]
    fn test_tie_break_compares_registrable_domains() {
        let acme = article("https://zzz.acme.com/r", "Harbor crane collapse")
            .with_publish_date(date(2024, 1, 1));
        let zine = article("https://beta.zine.com/r", "Orchard frost losses")
            .with_publish_date(date(2024, 1, 1));
        let query = article("https://q.com/q", "Council zoning vote")
            .with_publish_date(date(2024, 1, 5))
            .with_cited_url("https://zzz.acme.com/r")
            .with_cited_url("https://beta.zine.com/r");

        let graph = GraphBuilder::default_config().build(&[zine, acme, query]);
        let result = OriginTracer::default_config()
            .trace(&graph, "https://q.com/q")
            .unwrap();
        assert_eq!(result.origin_domain, "acme.com");
        assert_eq!(result.origin, "https://zzz.acme.com/r");
    }

    #[test]
    fn test_subdomains_of_one_site_fall_through_to_url() {
        let world = article("https://world.acme.com/b", "Harbor crane collapse")
            .with_publish_date(date(2024, 1, 1));
        let local = article("https://local.acme.com/a", "Orchard frost losses")
            .with_publish_date(date(2024, 1, 1));
        let query = article("https://q.com/q", "Council zoning vote")
            .with_publish_date(date(2024, 1, 5))
            .with_cited_url("https://world.acme.com/b")
            .with_cited_url("https://local.acme.com/a");

        let graph = GraphBuilder::default_config().build(&[world, local, query]);
        let result = OriginTracer::default_config()
            .trace(&graph, "https://q.com/q")
            .unwrap();
        assert_eq!(result.origin_domain, "acme.com");
        assert_eq!(result.origin, "https://local.acme.com/a");
    }

    #[test]
    fn test_missing_dates_rank_last() {
        let undated = article("https://undated.com/1", "Bridge inspection report");
        let dated = article("https://dated.com/1", "Transit fare increase")
            .with_publish_date(date(2024, 2, 1));
        let query = article("https://q.com/1", "School lunch program")
            .with_cited_url("https://undated.com/1")
            .with_cited_url("https://dated.com/1");

        let graph = GraphBuilder::default_config().build(&[undated, dated, query]);
        let result = OriginTracer::default_config()
            .trace(&graph, "https://q.com/1")
            .unwrap();
        assert_eq!(result.origin_domain, "dated.com");
    }

    #[test]
    fn test_cycle_still_yields_simple_path() {
        let a = article("https://a.com/1", "Reservoir levels alarming")
            .with_cited_url("https://b.com/2");
        let b = article("https://b.com/2", "Senate budget passes").with_cited_url("https://a.com/1");
        let graph = GraphBuilder::default_config().build(&[a, b]);

        let result = OriginTracer::default_config()
            .trace(&graph, "https://a.com/1")
            .unwrap();
        assert_eq!(result.origin, "https://b.com/2");
        assert_eq!(result.path, vec!["https://b.com/2", "https://a.com/1"]);
        assert!(result.is_simple_path());
    }

    #[test]
    fn test_pinned_origin_undirected_fallback() {
        let graph = chain();
        let result = OriginTracer::default_config()
            .trace_from(&graph, "https://c.com/3", "https://a.com/1")
            .unwrap();

        assert_eq!(result.path_kind, PathKind::Undirected);
        assert_eq!(
            result.path,
            vec!["https://c.com/3", "https://b.com/2", "https://a.com/1"]
        );
        assert!(result.summary.contains("could not be confirmed"));
    }

    #[test]
    fn test_pinned_origin_disconnected() {
        let graph = GraphBuilder::default_config().build(&[
            article("https://far.com/1", "Orchard frost losses"),
            article("https://near.com/1", "Harbor crane collapse"),
        ]);
        let result = OriginTracer::default_config()
            .trace_from(&graph, "https://far.com/1", "https://near.com/1")
            .unwrap();

        assert_eq!(result.path_kind, PathKind::Isolated);
        assert_eq!(result.path, vec!["https://near.com/1"]);
        assert_eq!(result.origin, "https://near.com/1");
        assert_eq!(
            result.summary,
            "No connection to far.com was found; near.com is its own apparent origin."
        );
    }

    #[test]
    fn test_mainstream_reach_counted() {
        let origin = article("https://smallblog.net/p", "Reservoir levels alarming")
            .with_publish_date(date(2024, 5, 1));
        let bbc = article("https://www.bbc.com/news/1", "Senate budget passes")
            .with_cited_url("https://smallblog.net/p");
        let cnn = article("https://edition.cnn.com/2", "Weekend weather outlook")
            .with_cited_url("https://www.bbc.com/news/1");

        let graph = GraphBuilder::default_config().build(&[origin, bbc, cnn]);
        let result = OriginTracer::default_config()
            .trace(&graph, "https://www.bbc.com/news/1")
            .unwrap();

        assert_eq!(result.reach, 2);
        assert_eq!(result.mainstream_reach, 2);
        assert_eq!(
            result.summary,
            "Story traced to smallblog.net across 1 hop of citation links, reaching 2 sources in total (including 2 mainstream outlets)."
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_graph() -> impl Strategy<Value = PropagationGraph> {
        (2usize..8).prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec(proptest::option::of(0u32..20), n),
                prop::collection::vec((0..n, 0..n, any::<bool>()), 0..(n * 2)),
            )
                .prop_map(|(n, days, edges)| {
                    let mut graph = PropagationGraph::new();
                    for (i, day) in days.iter().enumerate().take(n) {
                        let mut record =
                            ArticleRecord::new(&format!("https://s{}.com/x", i), "t").unwrap();
                        if let Some(d) = day {
                            record = record.with_publish_date(
                                NaiveDate::from_ymd_opt(2024, 1, 1 + d).unwrap(),
                            );
                        }
                        graph.add_node(record);
                    }
                    for (s, t, citation) in edges {
                        let kind = if citation { EdgeKind::Citation } else { EdgeKind::Similarity };
                        graph.add_edge(s, t, if citation { 1.0 } else { 0.5 }, kind);
                    }
                    graph
                })
        })
    }

    proptest! {
        /// Property: paths are simple, start at the origin, end at the query,
        /// and every hop is an edge in some direction
        #[test]
        fn test_path_invariants(graph in arb_graph()) {
            let tracer = OriginTracer::default_config();
            for (_, article) in graph.nodes() {
                let result = tracer.trace(&graph, article.url()).unwrap();
                prop_assert!(result.is_simple_path());
                prop_assert_eq!(result.query(), Some(article.url()));
                prop_assert_eq!(result.path.first(), Some(&result.origin));
                for pair in result.path.windows(2) {
                    let a = graph.index_of(&pair[0]).unwrap();
                    let b = graph.index_of(&pair[1]).unwrap();
                    prop_assert!(graph.connected(a, b));
                }
            }
        }

        /// Property: the inferred origin is never later than any dated ancestor
        #[test]
        fn test_origin_is_earliest(graph in arb_graph()) {
            let tracer = OriginTracer::default_config();
            for (idx, article) in graph.nodes() {
                let result = tracer.trace(&graph, article.url()).unwrap();
                let origin = graph.node(graph.index_of(&result.origin).unwrap()).unwrap();
                if let Some(origin_date) = origin.publish_date() {
                    for ancestor in ancestors(&graph, idx) {
                        if let Some(d) = graph.node(ancestor).unwrap().publish_date() {
                            prop_assert!(origin_date <= d);
                        }
                    }
                }
            }
        }
    }
}
