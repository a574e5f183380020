// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # semviz
//!
//! Turns RDF ontology documents into bounded, renderable node/edge graphs.
//!
//! ## Architecture
//!
//! - **Triple source** (`source`): RDF parsing via `oxigraph::io`, six serializations
//! - **Graph accumulator** (`graph::builder`): batched, deduplicating node/edge build
//! - **Top-K sampler** (`graph::sample`): degree-ranked induced subgraph
//! - **Neighborhood extractor** (`graph::neighborhood`): incoming/outgoing records
//! - **Click history** (`history`): per-session recency/frequency weighting
//!
//! ## Library usage
//!
//! ```no_run
//! use semviz::config::EngineConfig;
//! use semviz::engine::Engine;
//! use semviz::source::OntologyFormat;
//!
//! let engine = Engine::new(EngineConfig::default()).unwrap();
//! let ttl = "<http://ex.org/a> <http://ex.org/p> <http://ex.org/b> .";
//! let graph = engine.parse_graph(ttl, OntologyFormat::Turtle, Some(100)).unwrap();
//! assert_eq!(graph.node_count(), 2);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod history;
#[cfg(feature = "server")]
pub mod server;
pub mod source;
