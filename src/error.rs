//! Rich diagnostic error types for semviz.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so callers can tell a malformed document
//! apart from an unsupported format or a bad argument.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for semviz.
///
/// Each variant wraps a subsystem-specific error, preserving the full
/// diagnostic chain through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum SemvizError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

impl SemvizError {
    /// Whether the error was caused by caller input rather than an internal fault.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Load(LoadError::Io { .. }) => false,
            Self::Load(_) | Self::Graph(_) => true,
            Self::Config(_) => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("unsupported format: {format}")]
    #[diagnostic(
        code(semviz::load::unsupported_format),
        help("Supported formats: turtle, rdfxml, jsonld, ntriples, trig, nquads.")
    )]
    UnsupportedFormat { format: String },

    #[error("failed to parse ontology in format {format}: {message}")]
    #[diagnostic(
        code(semviz::load::parse),
        help(
            "The document is not valid {format}. Check the syntax near the reported \
             position, or pass a different `--format` if the file uses another serialization."
        )
    )]
    Parse { format: String, message: String },

    #[error("ontology content cannot be empty")]
    #[diagnostic(
        code(semviz::load::empty_content),
        help("Provide a non-empty RDF document.")
    )]
    EmptyContent,

    #[error("I/O error: {source}")]
    #[diagnostic(
        code(semviz::load::io),
        help("Reading the ontology failed. Check that the file exists and is readable.")
    )]
    Io {
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Graph errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    #[error("node identifier cannot be empty")]
    #[diagnostic(
        code(semviz::graph::empty_identifier),
        help("Pass the full identifier (usually an IRI) of the node to inspect.")
    )]
    EmptyIdentifier,

    #[error("dataset is empty")]
    #[diagnostic(
        code(semviz::graph::empty_dataset),
        help("A neighborhood query needs a dataset with at least one triple.")
    )]
    EmptyDataset,

    #[error("sampling capacity must be non-negative, got {capacity}")]
    #[diagnostic(
        code(semviz::graph::negative_capacity),
        help("Omit the capacity to keep the whole graph, or pass a value >= 0.")
    )]
    NegativeCapacity { capacity: i64 },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(semviz::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}: {message}")]
    #[diagnostic(
        code(semviz::config::parse),
        help("Check the TOML syntax in the config file.")
    )]
    Parse { path: String, message: String },

    #[error("invalid configuration: {message}")]
    #[diagnostic(code(semviz::config::invalid), help("Check the EngineConfig fields."))]
    Invalid { message: String },
}

/// Failure reported by a [`LabelLookup`](crate::graph::label::LabelLookup) implementation.
///
/// Never surfaces from label resolution; callers fall back to the identifier heuristic.
#[derive(Debug, Error)]
#[error("label lookup failed for {id}: {message}")]
pub struct LookupError {
    pub id: String,
    pub message: String,
}

/// Convenience alias for functions returning semviz results.
pub type SemvizResult<T> = std::result::Result<T, SemvizError>;
