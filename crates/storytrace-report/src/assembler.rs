//! Joins the graph, origin result, and credibility scores

use crate::payload::{
    GraphPayload, LinkPayload, NodePayload, OriginPathPayload, ResponsePayload, SummaryPayload,
};
use crate::AssemblyError;
use std::collections::BTreeMap;
use storytrace_domain::{ColorBucket, CredibilityScore, OriginResult, PropagationGraph};
use tracing::debug;

/// Builds the response payload
///
/// Assembly is a pure function of its inputs; identical inputs serialize to
/// identical bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultAssembler;

impl ResultAssembler {
    /// Create an assembler
    pub fn new() -> Self {
        Self
    }

    /// Assemble the payload
    ///
    /// # Errors
    ///
    /// [`AssemblyError::MissingScore`] if a node has no score, and
    /// [`AssemblyError::UnknownPathNode`] if the origin path leaves the graph.
    pub fn assemble(
        &self,
        graph: &PropagationGraph,
        origin: &OriginResult,
        scores: &BTreeMap<String, CredibilityScore>,
    ) -> Result<ResponsePayload, AssemblyError> {
        let mut nodes = Vec::with_capacity(graph.node_count());
        for (_, article) in graph.nodes() {
            let score = scores
                .get(article.url())
                .ok_or_else(|| AssemblyError::MissingScore {
                    url: article.url().to_string(),
                })?;
            nodes.push(NodePayload {
                id: article.url().to_string(),
                domain: article.domain().to_string(),
                title: article.title().to_string(),
                author: article.author().map(str::to_string),
                date: article
                    .publish_date()
                    .map(|d| d.format("%Y-%m-%d").to_string()),
                credibility: score.score,
                flags: score.flags.clone(),
                color: score.color,
            });
        }

        let mut links = Vec::with_capacity(graph.edge_count());
        for edge in graph.edges() {
            if let (Some(source), Some(target)) = (graph.node(edge.source), graph.node(edge.target)) {
                links.push(LinkPayload {
                    source: source.url().to_string(),
                    target: target.url().to_string(),
                    weight: edge.weight,
                    kind: edge.kind,
                });
            }
        }

        if let Some(url) = origin
            .path
            .iter()
            .chain(std::iter::once(&origin.origin))
            .find(|url| graph.index_of(url).is_none())
        {
            return Err(AssemblyError::UnknownPathNode { url: url.clone() });
        }

        let avg_credibility = if nodes.is_empty() {
            0.0
        } else {
            let sum: f64 = nodes.iter().map(|n| n.credibility).sum();
            (sum / nodes.len() as f64 * 100.0).round() / 100.0
        };
        let high_risk_count = nodes.iter().filter(|n| n.color == ColorBucket::Red).count();

        debug!(
            "Assembled payload: {} node(s), {} link(s), path of {} hop(s)",
            nodes.len(),
            links.len(),
            origin.hops()
        );

        Ok(ResponsePayload {
            summary: SummaryPayload {
                total_articles: nodes.len(),
                path_length: origin.hops(),
                avg_credibility,
                high_risk_count,
            },
            graph: GraphPayload { nodes, links },
            origin_path: OriginPathPayload {
                origin_domain: origin.origin_domain.clone(),
                path: origin.path.clone(),
                summary: origin.summary.clone(),
                origin: origin.origin.clone(),
                total_propagation: origin.reach,
                mainstream_coverage: origin.mainstream_reach,
            },
        })
    }
}
