//! Breadth-first traversals over a [`PropagationGraph`]
//!
//! Neighbors are visited in ascending index order, so every result is
//! reproducible for a given graph.

use std::collections::{BTreeSet, VecDeque};
use storytrace_domain::{NodeIndex, PropagationGraph};

/// Nodes that can reach `start` along directed edges (excluding `start`)
pub fn ancestors(graph: &PropagationGraph, start: NodeIndex) -> BTreeSet<NodeIndex> {
    reachable(graph, start, |idx| graph.predecessors(idx).to_vec())
}

/// Nodes reachable from `start` along directed edges (excluding `start`)
pub fn descendants(graph: &PropagationGraph, start: NodeIndex) -> BTreeSet<NodeIndex> {
    reachable(graph, start, |idx| graph.successors(idx).to_vec())
}

/// Shortest directed path by edge count, endpoints inclusive
pub fn shortest_path(
    graph: &PropagationGraph,
    from: NodeIndex,
    to: NodeIndex,
) -> Option<Vec<NodeIndex>> {
    bfs_path(graph, from, to, |idx| graph.successors(idx).to_vec())
}

/// Shortest path on the undirected projection, endpoints inclusive
pub fn shortest_undirected_path(
    graph: &PropagationGraph,
    from: NodeIndex,
    to: NodeIndex,
) -> Option<Vec<NodeIndex>> {
    bfs_path(graph, from, to, |idx| {
        let neighbors: BTreeSet<NodeIndex> = graph
            .successors(idx)
            .iter()
            .chain(graph.predecessors(idx))
            .copied()
            .collect();
        neighbors.into_iter().collect()
    })
}

fn reachable<F>(graph: &PropagationGraph, start: NodeIndex, neighbors: F) -> BTreeSet<NodeIndex>
where
    F: Fn(NodeIndex) -> Vec<NodeIndex>,
{
    let mut seen = BTreeSet::new();
    if start >= graph.node_count() {
        return seen;
    }

    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        for next in neighbors(current) {
            if next != start && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

fn bfs_path<F>(
    graph: &PropagationGraph,
    from: NodeIndex,
    to: NodeIndex,
    neighbors: F,
) -> Option<Vec<NodeIndex>>
where
    F: Fn(NodeIndex) -> Vec<NodeIndex>,
{
    let n = graph.node_count();
    if from >= n || to >= n {
        return None;
    }
    if from == to {
        return Some(vec![from]);
    }

    let mut parent: Vec<Option<NodeIndex>> = vec![None; n];
    let mut visited = vec![false; n];
    visited[from] = true;
    let mut queue = VecDeque::from([from]);

    while let Some(current) = queue.pop_front() {
        for next in neighbors(current) {
            if visited[next] {
                continue;
            }
            visited[next] = true;
            parent[next] = Some(current);
            if next == to {
                return Some(unwind(&parent, from, to));
            }
            queue.push_back(next);
        }
    }
    None
}

fn unwind(parent: &[Option<NodeIndex>], from: NodeIndex, to: NodeIndex) -> Vec<NodeIndex> {
    let mut path = vec![to];
    let mut current = to;
    while current != from {
        match parent[current] {
            Some(prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use storytrace_domain::{ArticleRecord, EdgeKind};

    /// 0 -> 1 -> 2, 0 -> 3, 4 isolated, 5 -> 3
    fn sample() -> PropagationGraph {
        let mut graph = PropagationGraph::new();
        for i in 0..6 {
            graph.add_node(ArticleRecord::new(&format!("https://n{}.com/s", i), "t").unwrap());
        }
        graph.add_edge(0, 1, 1.0, EdgeKind::Citation);
        graph.add_edge(1, 2, 1.0, EdgeKind::Citation);
        graph.add_edge(0, 3, 0.5, EdgeKind::Similarity);
        graph.add_edge(5, 3, 0.5, EdgeKind::Similarity);
        graph
    }

    #[test]
    fn test_ancestors_and_descendants() {
        let graph = sample();
        assert_eq!(ancestors(&graph, 2), BTreeSet::from([0, 1]));
        assert_eq!(ancestors(&graph, 3), BTreeSet::from([0, 5]));
        assert!(ancestors(&graph, 0).is_empty());
        assert_eq!(descendants(&graph, 0), BTreeSet::from([1, 2, 3]));
        assert!(descendants(&graph, 4).is_empty());
    }

    #[test]
    fn test_ancestors_exclude_start_in_cycle() {
        let mut graph = sample();
        graph.add_edge(2, 0, 0.3, EdgeKind::Similarity);
        let result = ancestors(&graph, 0);
        assert!(!result.contains(&0));
        assert_eq!(result, BTreeSet::from([1, 2]));
    }

    #[test]
    fn test_shortest_directed_path() {
        let graph = sample();
        assert_eq!(shortest_path(&graph, 0, 2), Some(vec![0, 1, 2]));
        assert_eq!(shortest_path(&graph, 2, 0), None);
        assert_eq!(shortest_path(&graph, 3, 3), Some(vec![3]));
    }

    #[test]
    fn test_undirected_fallback_path() {
        let graph = sample();
        assert_eq!(shortest_undirected_path(&graph, 2, 0), Some(vec![2, 1, 0]));
        assert_eq!(shortest_undirected_path(&graph, 5, 1), Some(vec![5, 3, 0, 1]));
        assert_eq!(shortest_undirected_path(&graph, 4, 0), None);
    }

    #[test]
    fn test_out_of_range_indices() {
        let graph = sample();
        assert_eq!(shortest_path(&graph, 0, 99), None);
        assert!(ancestors(&graph, 99).is_empty());
    }
}
