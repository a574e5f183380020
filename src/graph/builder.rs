//! Graph accumulation from a triple stream.
//!
//! Triples are consumed in fixed-size batches so the working set per step is
//! bounded. Batch size never changes the result: node set, edge list, and
//! degrees depend only on the triples and their arrival order.

use std::collections::HashMap;

use rayon::prelude::*;

use super::{DegreeMap, Edge, Graph, Node, Triple};

/// Default number of triples processed per batch.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Accumulates nodes, edges, and degrees.
///
/// Nodes are kept in first-seen order; edges in arrival order.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    node_index: HashMap<String, usize>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    degrees: DegreeMap,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_node(&mut self, id: &str) {
        if self.node_index.contains_key(id) {
            return;
        }
        self.node_index.insert(id.to_string(), self.nodes.len());
        self.nodes.push(Node::new(id));
    }

    /// Add one triple: both endpoint nodes, one edge, and two degree increments.
    pub fn push(&mut self, triple: &Triple) {
        self.ensure_node(&triple.subject);
        self.ensure_node(&triple.object);
        self.edges.push(Edge::from(triple));

        *self.degrees.entry(triple.subject.clone()).or_insert(0) += 1;
        *self.degrees.entry(triple.object.clone()).or_insert(0) += 1;
    }

    /// Add a batch of triples in order.
    pub fn extend_batch(&mut self, batch: &[Triple]) {
        for triple in batch {
            self.push(triple);
        }
    }

    /// Append another builder's contents after this one's.
    ///
    /// Equivalent to having pushed `other`'s triples after `self`'s.
    pub fn merge(mut self, other: GraphBuilder) -> Self {
        for node in other.nodes {
            if !self.node_index.contains_key(&node.id) {
                self.node_index.insert(node.id.clone(), self.nodes.len());
                self.nodes.push(node);
            }
        }
        self.edges.extend(other.edges);
        for (id, degree) in other.degrees {
            *self.degrees.entry(id).or_insert(0) += degree;
        }
        self
    }

    /// Running degree counts.
    pub fn degrees(&self) -> &DegreeMap {
        &self.degrees
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Hand the accumulated graph to the caller.
    pub fn finish(self) -> Graph {
        Graph {
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}

/// Build a graph from a fallible triple stream, `batch_size` triples at a time.
///
/// The first stream error aborts the build and is returned unchanged.
/// A `batch_size` of zero is treated as one.
pub fn build_graph<I, E>(triples: I, batch_size: usize) -> Result<Graph, E>
where
    I: IntoIterator<Item = Result<Triple, E>>,
{
    build_graph_with_degrees(triples, batch_size).map(|(graph, _)| graph)
}

/// Like [`build_graph`], also returning the degree map kept during accumulation.
pub fn build_graph_with_degrees<I, E>(
    triples: I,
    batch_size: usize,
) -> Result<(Graph, DegreeMap), E>
where
    I: IntoIterator<Item = Result<Triple, E>>,
{
    let batch_size = batch_size.max(1);
    let mut builder = GraphBuilder::new();
    let mut batch: Vec<Triple> = Vec::with_capacity(batch_size);
    let mut batches = 0usize;

    for triple in triples {
        batch.push(triple?);
        if batch.len() >= batch_size {
            builder.extend_batch(&batch);
            batch.clear();
            batches += 1;
            tracing::debug!(
                batches,
                nodes = builder.node_count(),
                edges = builder.edge_count(),
                "processed triple batch"
            );
        }
    }
    if !batch.is_empty() {
        builder.extend_batch(&batch);
        batches += 1;
    }

    tracing::debug!(
        batches,
        nodes = builder.node_count(),
        edges = builder.edge_count(),
        "graph accumulation complete"
    );

    let degrees = std::mem::take(&mut builder.degrees);
    Ok((builder.finish(), degrees))
}

/// Build a graph from materialized triples, one batch per rayon task.
///
/// Partial builders are merged in batch order, so the result equals the
/// sequential [`build_graph`] output exactly.
pub fn build_graph_parallel(triples: &[Triple], batch_size: usize) -> Graph {
    let batch_size = batch_size.max(1);
    triples
        .par_chunks(batch_size)
        .map(|chunk| {
            let mut builder = GraphBuilder::new();
            builder.extend_batch(chunk);
            builder
        })
        .reduce(GraphBuilder::new, GraphBuilder::merge)
        .finish()
}
