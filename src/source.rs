//! Triple source: RDF documents → [`Triple`] stream.
//!
//! Parsing is delegated to `oxigraph::io`. This module resolves the format
//! identifier once, at the boundary, into [`OntologyFormat`], and renders
//! parsed terms into the plain-string identifiers the graph works with.

use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::{Quad, Term};

use crate::error::LoadError;
use crate::graph::{TermKind, Triple};

pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Supported RDF serializations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OntologyFormat {
    #[default]
    Turtle,
    RdfXml,
    JsonLd,
    NTriples,
    TriG,
    NQuads,
}

impl OntologyFormat {
    pub const ALL: [OntologyFormat; 6] = [
        Self::Turtle,
        Self::RdfXml,
        Self::JsonLd,
        Self::NTriples,
        Self::TriG,
        Self::NQuads,
    ];

    /// Canonical identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Turtle => "turtle",
            Self::RdfXml => "rdfxml",
            Self::JsonLd => "jsonld",
            Self::NTriples => "ntriples",
            Self::TriG => "trig",
            Self::NQuads => "nquads",
        }
    }

    /// All identifiers accepted by [`FromStr`], canonical first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Turtle => &["turtle", "ttl"],
            Self::RdfXml => &["rdfxml", "rdf/xml", "rdf"],
            Self::JsonLd => &["jsonld", "json-ld"],
            Self::NTriples => &["ntriples", "n-triples", "nt"],
            Self::TriG => &["trig"],
            Self::NQuads => &["nquads", "n-quads", "nq"],
        }
    }

    fn rdf_format(self) -> Option<RdfFormat> {
        match self {
            Self::Turtle => Some(RdfFormat::Turtle),
            Self::RdfXml => Some(RdfFormat::RdfXml),
            Self::JsonLd => RdfFormat::from_media_type("application/ld+json"),
            Self::NTriples => Some(RdfFormat::NTriples),
            Self::TriG => Some(RdfFormat::TriG),
            Self::NQuads => Some(RdfFormat::NQuads),
        }
    }
}

impl fmt::Display for OntologyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OntologyFormat {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.aliases().contains(&normalized.as_str()))
            .ok_or_else(|| LoadError::UnsupportedFormat {
                format: s.to_string(),
            })
    }
}

/// Stream triples out of `reader`.
///
/// Graph names are dropped, so TriG and N-Quads input is flattened. Parse
/// failures are yielded as [`LoadError::Parse`] items.
pub fn read_triples<R: Read>(
    reader: R,
    format: OntologyFormat,
) -> LoadResult<impl Iterator<Item = LoadResult<Triple>>> {
    let rdf_format = format.rdf_format().ok_or_else(|| LoadError::UnsupportedFormat {
        format: format.to_string(),
    })?;

    Ok(RdfParser::from_format(rdf_format)
        .for_reader(reader)
        .map(move |quad| {
            quad.map(triple_from_quad).map_err(|e| LoadError::Parse {
                format: format.to_string(),
                message: e.to_string(),
            })
        }))
}

/// Parse a whole document held in memory.
pub fn load_triples(content: &str, format: OntologyFormat) -> LoadResult<Vec<Triple>> {
    if content.trim().is_empty() {
        return Err(LoadError::EmptyContent);
    }
    let triples = read_triples(content.as_bytes(), format)?.collect::<LoadResult<Vec<_>>>()?;
    tracing::debug!(%format, triples = triples.len(), "parsed ontology");
    Ok(triples)
}

/// Read and parse an ontology file.
pub fn load_file(path: &Path, format: OntologyFormat) -> LoadResult<Vec<Triple>> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io { source })?;
    load_triples(&content, format)
}

fn triple_from_quad(quad: Quad) -> Triple {
    let subject: Term = quad.subject.into();
    let (subject, _) = render_term(subject);
    let (object, object_kind) = render_term(quad.object);
    Triple {
        subject,
        predicate: quad.predicate.into_string(),
        object,
        object_kind,
    }
}

fn render_term(term: Term) -> (String, TermKind) {
    match term {
        Term::NamedNode(node) => (node.into_string(), TermKind::Resource),
        Term::BlankNode(node) => (format!("_:{}", node.as_str()), TermKind::Resource),
        Term::Literal(literal) => (literal.value().to_string(), TermKind::Literal),
        #[allow(unreachable_patterns)]
        other => (other.to_string(), TermKind::Resource),
    }
}
