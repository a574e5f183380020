//! Ontology graph: triples, nodes, edges, and the algorithms over them.
//!
//! The pipeline turns a triple stream into a renderable [`Graph`]:
//!
//! - **Accumulation** ([`builder`]): batched, order-independent node/edge/degree build
//! - **Sampling** ([`sample`]): induced subgraph on the top-K nodes by degree
//! - **Statistics** ([`stats`]): counts over a built graph
//! - **Neighborhood** ([`neighborhood`]): incoming/outgoing edges of one node,
//!   resolved against a live [`dataset::Dataset`]
//!
//! Labels for nodes and edges are derived by [`label`].

pub mod builder;
pub mod dataset;
pub mod label;
pub mod neighborhood;
pub mod sample;
pub mod stats;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Whether a term denotes a resource (IRI or blank node) or a literal value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermKind {
    #[default]
    Resource,
    Literal,
}

/// A (subject, predicate, object) statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
    /// Kind of the object term. Subjects are always resources.
    #[serde(default)]
    pub object_kind: TermKind,
}

impl Triple {
    /// Create a triple whose object is a resource.
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            object_kind: TermKind::Resource,
        }
    }

    /// Create a triple whose object is a literal.
    pub fn literal(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            object_kind: TermKind::Literal,
            ..Self::new(subject, predicate, value)
        }
    }

    /// Whether the object is a literal value.
    pub fn has_literal_object(&self) -> bool {
        self.object_kind == TermKind::Literal
    }
}

/// A graph node, unique by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
}

impl Node {
    /// Create a node, deriving its label from the identifier.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let label = label::extract_label(&id).to_string();
        Self { id, label }
    }
}

/// A directed edge; one per ingested triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub subject: String,
    pub object: String,
    pub predicate: String,
    pub label: String,
}

impl Edge {
    /// Create an edge, deriving its label from the predicate.
    pub fn new(
        subject: impl Into<String>,
        object: impl Into<String>,
        predicate: impl Into<String>,
    ) -> Self {
        let predicate = predicate.into();
        let label = label::extract_label(&predicate).to_string();
        Self {
            subject: subject.into(),
            object: object.into(),
            predicate,
            label,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.subject == self.object
    }
}

impl From<&Triple> for Edge {
    fn from(t: &Triple) -> Self {
        Edge::new(t.subject.clone(), t.object.clone(), t.predicate.clone())
    }
}

/// Node id → number of edge endpoints touching it (self-loops count twice).
pub type DegreeMap = HashMap<String, usize>;

/// Renderable graph: unique nodes plus edges in ingestion order.
///
/// Every edge's `subject` and `object` appear among `nodes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Recompute degrees from the edge list.
    pub fn degree_map(&self) -> DegreeMap {
        degrees_of(&self.edges)
    }

    /// Check that every edge endpoint is a node of this graph.
    pub fn is_closed(&self) -> bool {
        let ids: std::collections::HashSet<&str> =
            self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.edges
            .iter()
            .all(|e| ids.contains(e.subject.as_str()) && ids.contains(e.object.as_str()))
    }
}

/// Count endpoint occurrences over a set of edges.
pub fn degrees_of<'a>(edges: impl IntoIterator<Item = &'a Edge>) -> DegreeMap {
    let mut degrees = DegreeMap::new();
    for edge in edges {
        *degrees.entry(edge.subject.clone()).or_insert(0) += 1;
        *degrees.entry(edge.object.clone()).or_insert(0) += 1;
    }
    degrees
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_and_edge_labels_are_derived() {
        let node = Node::new("http://ex.org/onto#Cat");
        assert_eq!(node.label, "Cat");

        let edge = Edge::new("a", "b", "http://ex.org/onto/eats");
        assert_eq!(edge.label, "eats");
    }

    #[test]
    fn self_loop_counts_twice() {
        let edges = vec![Edge::new("A", "A", "p"), Edge::new("A", "B", "q")];
        let degrees = degrees_of(&edges);
        assert_eq!(degrees["A"], 3);
        assert_eq!(degrees["B"], 1);
        assert!(edges[0].is_self_loop());
    }

    #[test]
    fn literal_triple_marks_object_kind() {
        let t = Triple::literal("s", "p", "hello");
        assert!(t.has_literal_object());
        assert!(!Triple::new("s", "p", "o").has_literal_object());
    }

    #[test]
    fn graph_serializes_nodes_and_edges() {
        let graph = Graph {
            nodes: vec![Node::new("A"), Node::new("B")],
            edges: vec![Edge::new("A", "B", "http://ex.org/p")],
        };
        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["nodes"][0]["id"], "A");
        assert_eq!(json["edges"][0]["label"], "p");
        assert!(graph.is_closed());
    }

    #[test]
    fn dangling_edge_is_detected() {
        let graph = Graph {
            nodes: vec![Node::new("A")],
            edges: vec![Edge::new("A", "B", "p")],
        };
        assert!(!graph.is_closed());
    }
}
