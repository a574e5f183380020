//! Engine facade: top-level API for semviz.
//!
//! The `Engine` wires the triple source, accumulator, sampler, statistics, and
//! neighborhood extractor together. Every call parses its own input and owns
//! its working data; nothing is cached between calls, so one `Engine` can be
//! shared freely across threads.

use crate::config::EngineConfig;
use crate::error::{GraphError, LoadError, SemvizResult};
use crate::graph::Graph;
use crate::graph::builder::build_graph;
use crate::graph::dataset::Dataset;
use crate::graph::label::LabelLookup;
use crate::graph::neighborhood::{NodeDetails, get_neighborhood_with};
use crate::graph::sample::sample_top_k;
use crate::graph::stats::{GraphStatistics, compute_statistics};
use crate::source::{OntologyFormat, load_triples, read_triples};

/// The semviz ontology engine.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create a new engine with the given configuration.
    pub fn new(config: EngineConfig) -> SemvizResult<Self> {
        config.validate()?;
        tracing::info!(
            batch_size = config.batch_size,
            default_max_nodes = config.default_max_nodes,
            enhanced_labels = config.enhanced_labels,
            "initializing semviz engine"
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build the full, unsampled graph of a document.
    pub fn build_graph(&self, content: &str, format: OntologyFormat) -> SemvizResult<Graph> {
        if content.trim().is_empty() {
            return Err(LoadError::EmptyContent.into());
        }
        let triples = read_triples(content.as_bytes(), format)?;
        let graph = build_graph(triples, self.config.batch_size)?;
        tracing::info!(
            %format,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built ontology graph"
        );
        Ok(graph)
    }

    /// Build a graph and cap it at `max_nodes` (or the configured default).
    ///
    /// A negative `max_nodes` is rejected before any parsing happens.
    pub fn parse_graph(
        &self,
        content: &str,
        format: OntologyFormat,
        max_nodes: Option<i64>,
    ) -> SemvizResult<Graph> {
        let capacity = self.capacity(max_nodes)?;
        let graph = self.build_graph(content, format)?;
        let total = graph.node_count();
        let sampled = sample_top_k(graph, Some(capacity));
        if sampled.node_count() < total {
            tracing::info!(
                capacity,
                total_nodes = total,
                kept_nodes = sampled.node_count(),
                kept_edges = sampled.edge_count(),
                "graph capped to highest-degree nodes"
            );
        }
        Ok(sampled)
    }

    /// Incoming and outgoing connections of `node_id` within a document.
    pub fn node_details(
        &self,
        content: &str,
        format: OntologyFormat,
        node_id: &str,
    ) -> SemvizResult<NodeDetails> {
        if node_id.trim().is_empty() {
            return Err(GraphError::EmptyIdentifier.into());
        }
        let triples = load_triples(content, format)?;
        let dataset = Dataset::with_label_property(triples, self.config.label_property.clone());
        let lookup: Option<&dyn LabelLookup> = if self.config.enhanced_labels {
            Some(&dataset)
        } else {
            None
        };
        let details = get_neighborhood_with(&dataset, node_id, lookup)?;
        tracing::info!(
            node = node_id,
            incoming = details.incoming.len(),
            outgoing = details.outgoing.len(),
            "resolved node neighborhood"
        );
        Ok(details)
    }

    /// Counts over the full, unsampled graph.
    pub fn statistics(
        &self,
        content: &str,
        format: OntologyFormat,
    ) -> SemvizResult<GraphStatistics> {
        let graph = self.build_graph(content, format)?;
        Ok(compute_statistics(&graph))
    }

    fn capacity(&self, max_nodes: Option<i64>) -> Result<usize, GraphError> {
        match max_nodes {
            None => Ok(self.config.default_max_nodes),
            Some(n) if n < 0 => Err(GraphError::NegativeCapacity { capacity: n }),
            Some(n) => Ok(usize::try_from(n).unwrap_or(usize::MAX)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, SemvizError};

    const TTL: &str = r#"
        @prefix ex: <http://ex.org/onto#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        ex:A ex:p ex:B .
        ex:B ex:q ex:C .
        ex:A ex:r ex:C .
        ex:C rdfs:label "See" .
    "#;

    fn engine() -> Engine {
        Engine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Engine::new(EngineConfig {
            batch_size: 0,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, SemvizError::Config(ConfigError::Invalid { .. })));
    }

    #[test]
    fn parse_graph_applies_default_cap() {
        let engine = Engine::new(EngineConfig {
            default_max_nodes: 2,
            ..Default::default()
        })
        .unwrap();
        let graph = engine.parse_graph(TTL, OntologyFormat::Turtle, None).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert!(graph.is_closed());
    }

    #[test]
    fn explicit_cap_overrides_default() {
        let graph = engine()
            .parse_graph(TTL, OntologyFormat::Turtle, Some(1))
            .unwrap();
        assert_eq!(graph.node_count(), 1);
        // C has degree 3 (two edges plus the label triple).
        assert_eq!(graph.nodes[0].id, "http://ex.org/onto#C");
    }

    #[test]
    fn negative_cap_is_invalid_argument() {
        let err = engine()
            .parse_graph(TTL, OntologyFormat::Turtle, Some(-1))
            .unwrap_err();
        assert!(matches!(
            err,
            SemvizError::Graph(GraphError::NegativeCapacity { capacity: -1 })
        ));
    }

    #[test]
    fn empty_content_is_rejected() {
        let err = engine().build_graph("", OntologyFormat::Turtle).unwrap_err();
        assert!(matches!(err, SemvizError::Load(LoadError::EmptyContent)));
    }

    #[test]
    fn statistics_use_unsampled_graph() {
        let stats = engine().statistics(TTL, OntologyFormat::Turtle).unwrap();
        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.edge_count, 4);
        assert_eq!(stats.triple_count, 4);
        assert_eq!(stats.distinct_label_count, 4);
    }

    #[test]
    fn node_details_use_label_property() {
        let details = engine()
            .node_details(TTL, OntologyFormat::Turtle, "http://ex.org/onto#A")
            .unwrap();
        let labels: Vec<&str> = details.outgoing.iter().map(|r| r.node_label.as_str()).collect();
        assert_eq!(labels, ["B", "See"]);
    }

    #[test]
    fn node_details_without_enhancement() {
        let engine = Engine::new(EngineConfig {
            enhanced_labels: false,
            ..Default::default()
        })
        .unwrap();
        let details = engine
            .node_details(TTL, OntologyFormat::Turtle, "http://ex.org/onto#A")
            .unwrap();
        assert_eq!(details.outgoing[1].node_label, "C");
    }

    #[test]
    fn node_details_require_identifier() {
        let err = engine()
            .node_details(TTL, OntologyFormat::Turtle, "")
            .unwrap_err();
        assert!(matches!(err, SemvizError::Graph(GraphError::EmptyIdentifier)));
    }
}
