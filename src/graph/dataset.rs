//! Indexed triple set for live lookups.
//!
//! Unlike [`Graph`](super::Graph), a [`Dataset`] keeps literal/resource
//! distinctions and supports per-node lookups, which the neighborhood query
//! and the label-property enhancement need.

use std::collections::HashMap;

use crate::error::LookupError;

use super::Triple;
use super::label::LabelLookup;

/// IRI of `rdfs:label`, the default label property.
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

/// Immutable triple set indexed by subject and object.
#[derive(Debug, Clone)]
pub struct Dataset {
    triples: Vec<Triple>,
    by_subject: HashMap<String, Vec<usize>>,
    by_object: HashMap<String, Vec<usize>>,
    label_property: String,
}

impl Dataset {
    /// Index `triples`, using `rdfs:label` as the label property.
    pub fn new(triples: Vec<Triple>) -> Self {
        Self::with_label_property(triples, RDFS_LABEL)
    }

    /// Index `triples` with a custom label property IRI.
    pub fn with_label_property(triples: Vec<Triple>, label_property: impl Into<String>) -> Self {
        let mut by_subject: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_object: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, t) in triples.iter().enumerate() {
            by_subject.entry(t.subject.clone()).or_default().push(i);
            // Literal values are not nodes; they never receive incoming edges.
            if !t.has_literal_object() {
                by_object.entry(t.object.clone()).or_default().push(i);
            }
        }
        Self {
            triples,
            by_subject,
            by_object,
            label_property: label_property.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn label_property(&self) -> &str {
        &self.label_property
    }

    /// Whether `id` occurs as a subject or resource object.
    pub fn contains(&self, id: &str) -> bool {
        self.by_subject.contains_key(id) || self.by_object.contains_key(id)
    }

    /// Triples with `id` as subject, in ingestion order.
    pub fn outgoing<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Triple> + use<'a> {
        self.indexed(self.by_subject.get(id))
    }

    /// Triples with `id` as a resource object, in ingestion order.
    pub fn incoming<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Triple> + use<'a> {
        self.indexed(self.by_object.get(id))
    }

    fn indexed<'a>(&'a self, idx: Option<&'a Vec<usize>>) -> impl Iterator<Item = &'a Triple> + 'a {
        idx.into_iter().flatten().map(move |&i| &self.triples[i])
    }
}

impl LabelLookup for Dataset {
    /// First non-empty literal value of the label property for `id`.
    fn lookup_label(&self, id: &str) -> Result<Option<String>, LookupError> {
        Ok(self
            .outgoing(id)
            .filter(|t| t.predicate == self.label_property && t.has_literal_object())
            .map(|t| t.object.as_str())
            .find(|v| !v.is_empty())
            .map(str::to_string))
    }
}
