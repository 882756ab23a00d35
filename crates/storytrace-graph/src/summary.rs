//! Templated origin summaries

use storytrace_domain::{EdgeKind, PathKind};

/// Facts a summary sentence is rendered from
pub(crate) struct SummaryFacts<'a> {
    pub node_count: usize,
    pub origin_domain: &'a str,
    pub query_domain: &'a str,
    /// Domain of the origin candidate that could not be connected to the query
    pub unreachable_domain: Option<&'a str>,
    pub hops: usize,
    pub kind: PathKind,
    pub edge_kinds: &'a [EdgeKind],
    pub reach: usize,
    pub mainstream: usize,
}

pub(crate) fn render(facts: &SummaryFacts<'_>) -> String {
    if facts.node_count <= 1 {
        return format!(
            "No propagation detected: {} is the only article in the set.",
            facts.query_domain
        );
    }

    match facts.kind {
        PathKind::Isolated => format!(
            "No connection to {} was found; {} is its own apparent origin.",
            facts.unreachable_domain.unwrap_or(facts.origin_domain),
            facts.query_domain
        ),
        PathKind::Undirected => format!(
            "Story linked to {} across {}, but the direction of propagation could not be confirmed.",
            facts.origin_domain,
            count(facts.hops, "hop", "hops")
        ),
        PathKind::Directed if facts.hops == 0 => {
            if facts.reach == 0 {
                format!(
                    "{} appears to be its own origin; no propagation detected.",
                    facts.origin_domain
                )
            } else {
                format!(
                    "{} appears to be the origin of this story, which then spread to {}{}.",
                    facts.origin_domain,
                    count(facts.reach, "other source", "other sources"),
                    mainstream_clause(facts.mainstream)
                )
            }
        }
        // `reach` includes the path itself, so it is reported as a total
        PathKind::Directed => {
            let spread = if facts.reach > facts.hops {
                format!(
                    ", reaching {} in total{}",
                    count(facts.reach, "source", "sources"),
                    mainstream_clause(facts.mainstream)
                )
            } else {
                mainstream_clause(facts.mainstream)
            };
            format!(
                "Story traced to {} across {} of {} links{}.",
                facts.origin_domain,
                count(facts.hops, "hop", "hops"),
                link_mix(facts.edge_kinds),
                spread
            )
        }
    }
}

fn link_mix(kinds: &[EdgeKind]) -> &'static str {
    let citations = kinds.iter().any(|k| *k == EdgeKind::Citation);
    let similarities = kinds.iter().any(|k| *k == EdgeKind::Similarity);
    match (citations, similarities) {
        (true, true) => "citation and similarity",
        (false, true) => "similarity",
        _ => "citation",
    }
}

fn mainstream_clause(mainstream: usize) -> String {
    if mainstream == 0 {
        return String::new();
    }
    format!(
        " (including {})",
        count(mainstream, "mainstream outlet", "mainstream outlets")
    )
}

fn count(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("1 {}", singular)
    } else {
        format!("{} {}", n, plural)
    }
}
