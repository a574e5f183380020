//! Top-K degree sampling.
//!
//! Keeps the K highest-degree nodes and exactly those edges whose endpoints
//! both survive, i.e. the induced subgraph on the selection.

use std::cmp::Reverse;
use std::collections::HashSet;

use super::Graph;

/// Reduce `graph` to the induced subgraph on its `capacity` highest-degree nodes.
///
/// Degrees are recomputed from the edges present. Ties are broken by
/// identifier, ascending. With no capacity, or when the graph already fits,
/// the input is returned unchanged.
pub fn sample_top_k(graph: Graph, capacity: Option<usize>) -> Graph {
    let Some(k) = capacity else {
        return graph;
    };
    if graph.node_count() <= k {
        return graph;
    }

    let selected: HashSet<String> = select_top_k(&graph, k)
        .into_iter()
        .map(str::to_owned)
        .collect();

    let Graph { nodes, edges } = graph;
    let nodes: Vec<_> = nodes
        .into_iter()
        .filter(|n| selected.contains(n.id.as_str()))
        .collect();
    let edges: Vec<_> = edges
        .into_iter()
        .filter(|e| selected.contains(e.subject.as_str()) && selected.contains(e.object.as_str()))
        .collect();

    tracing::debug!(
        capacity = k,
        nodes = nodes.len(),
        edges = edges.len(),
        "sampled top-k subgraph"
    );

    Graph { nodes, edges }
}

/// Identifiers of the `k` highest-degree nodes, ties broken by identifier.
pub fn select_top_k(graph: &Graph, k: usize) -> HashSet<&str> {
    let degrees = graph.degree_map();
    let mut ranked: Vec<(usize, &str)> = graph
        .nodes
        .iter()
        .map(|n| (degrees.get(&n.id).copied().unwrap_or(0), n.id.as_str()))
        .collect();
    ranked.sort_unstable_by_key(|&(degree, id)| (Reverse(degree), id));
    ranked.into_iter().take(k).map(|(_, id)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::build_graph;
    use crate::graph::{Edge, Node, Triple};

    fn graph_of(triples: &[(&str, &str, &str)]) -> Graph {
        let stream = triples
            .iter()
            .map(|&(s, p, o)| Ok::<_, std::convert::Infallible>(Triple::new(s, p, o)));
        build_graph(stream, 500).unwrap()
    }

    #[test]
    fn absent_capacity_is_identity() {
        let graph = graph_of(&[("A", "p", "B"), ("B", "q", "C")]);
        assert_eq!(sample_top_k(graph.clone(), None), graph);
    }

    #[test]
    fn capacity_at_or_above_size_is_identity() {
        let graph = graph_of(&[("A", "p", "B"), ("B", "q", "C")]);
        assert_eq!(sample_top_k(graph.clone(), Some(3)), graph);
        assert_eq!(sample_top_k(graph.clone(), Some(10)), graph);
    }

    #[test]
    fn tie_break_is_lexicographic_and_edges_are_induced() {
        let graph = graph_of(&[("A", "p", "B"), ("B", "q", "C"), ("A", "r", "C")]);
        let sampled = sample_top_k(graph, Some(2));

        let ids: Vec<&str> = sampled.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["A", "B"]);
        assert_eq!(sampled.edges, vec![Edge::new("A", "B", "p")]);
    }

    #[test]
    fn highest_degree_wins_over_identifier() {
        // Z is a hub; A and B are leaves.
        let graph = graph_of(&[("Z", "p", "A"), ("Z", "p", "B"), ("Z", "p", "C")]);
        let sampled = sample_top_k(graph, Some(1));
        assert_eq!(sampled.nodes, vec![Node::new("Z")]);
        assert!(sampled.edges.is_empty());
    }

    #[test]
    fn zero_capacity_yields_empty_graph() {
        let graph = graph_of(&[("A", "p", "B")]);
        let sampled = sample_top_k(graph, Some(0));
        assert!(sampled.is_empty());
    }

    #[test]
    fn self_loops_count_twice_for_ranking() {
        // L has a self-loop (degree 2); M and N have degree 1 each.
        let graph = graph_of(&[("L", "p", "L"), ("M", "p", "N")]);
        let sampled = sample_top_k(graph, Some(1));
        assert_eq!(sampled.nodes, vec![Node::new("L")]);
        assert_eq!(sampled.edges.len(), 1);
    }

    #[test]
    fn isolated_nodes_rank_last() {
        let graph = Graph {
            nodes: vec![Node::new("A"), Node::new("B"), Node::new("C")],
            edges: vec![Edge::new("B", "C", "p")],
        };
        let sampled = sample_top_k(graph, Some(2));
        let ids: Vec<&str> = sampled.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["B", "C"]);
    }

    #[test]
    fn repeated_sampling_is_idempotent() {
        let graph = graph_of(&[
            ("A", "p", "B"),
            ("B", "q", "C"),
            ("C", "r", "D"),
            ("D", "s", "A"),
            ("A", "t", "C"),
        ]);
        let once = sample_top_k(graph, Some(3));
        let twice = sample_top_k(once.clone(), Some(3));
        assert_eq!(once, twice);
        assert!(once.is_closed());
    }
}
