//! Display labels for identifiers.
//!
//! The default heuristic takes the IRI fragment or last path segment. The
//! Neighborhood Extractor can additionally consult a [`LabelLookup`] (usually a
//! [`Dataset`](super::dataset::Dataset) property such as `rdfs:label`) before
//! falling back to the heuristic.

use crate::error::LookupError;

/// Derive a label from an identifier.
///
/// Text after the last `#`, else after the last `/`, else the input unchanged.
pub fn extract_label(id: &str) -> &str {
    if let Some(pos) = id.rfind('#') {
        &id[pos + 1..]
    } else if let Some(pos) = id.rfind('/') {
        &id[pos + 1..]
    } else {
        id
    }
}

/// Source of explicit labels for identifiers.
pub trait LabelLookup {
    /// Find an explicit label for `id`. `Ok(None)` when the identifier has none.
    fn lookup_label(&self, id: &str) -> Result<Option<String>, LookupError>;
}

/// Resolve a label, preferring a non-empty explicit label from `lookup`.
///
/// Lookup failures never propagate: the heuristic label is returned instead.
pub fn resolve_label_with(lookup: Option<&dyn LabelLookup>, id: &str) -> String {
    let Some(lookup) = lookup else {
        return extract_label(id).to_string();
    };
    if id.is_empty() {
        return String::new();
    }
    match lookup.lookup_label(id) {
        Ok(Some(label)) if !label.is_empty() => label,
        Ok(_) => extract_label(id).to_string(),
        Err(e) => {
            tracing::debug!(id, error = %e, "label lookup failed, using identifier heuristic");
            extract_label(id).to_string()
        }
    }
}
