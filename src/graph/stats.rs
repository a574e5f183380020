//! Summary counts over a built graph.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::Graph;

/// Counts shown alongside a rendered graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    /// One edge per triple, so always equal to `edge_count`.
    pub triple_count: usize,
    /// Distinct edge labels (not distinct predicate IRIs).
    pub distinct_label_count: usize,
}

/// Compute statistics in one pass over the edges.
pub fn compute_statistics(graph: &Graph) -> GraphStatistics {
    let labels: HashSet<&str> = graph.edges.iter().map(|e| e.label.as_str()).collect();
    GraphStatistics {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        triple_count: graph.edge_count(),
        distinct_label_count: labels.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    #[test]
    fn empty_graph_has_zero_counts() {
        let stats = compute_statistics(&Graph::new());
        assert_eq!(stats.node_count, 0);
        assert_eq!(stats.edge_count, 0);
        assert_eq!(stats.distinct_label_count, 0);
    }

    #[test]
    fn labels_group_across_namespaces() {
        let graph = Graph {
            nodes: vec![Node::new("A"), Node::new("B")],
            edges: vec![
                Edge::new("A", "B", "http://one.org/ns#type"),
                Edge::new("B", "A", "http://two.org/vocab/type"),
                Edge::new("A", "A", "http://one.org/ns#likes"),
            ],
        };
        let stats = compute_statistics(&graph);
        assert_eq!(stats.node_count, 2);
        assert_eq!(stats.edge_count, 3);
        assert_eq!(stats.triple_count, stats.edge_count);
        assert_eq!(stats.distinct_label_count, 2);
    }

    #[test]
    fn serializes_camel_case() {
        let stats = compute_statistics(&Graph::new());
        let json = serde_json::to_value(stats).unwrap();
        assert!(json.get("distinctLabelCount").is_some());
        assert!(json.get("tripleCount").is_some());
    }
}
