//! Local neighborhood of a single node.

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

use super::dataset::Dataset;
use super::label::{LabelLookup, resolve_label_with};

/// One connection of the inspected node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborRecord {
    pub node_id: String,
    pub node_label: String,
    pub relationship_type: String,
}

/// A node with its incoming and outgoing connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDetails {
    pub id: String,
    pub label: String,
    pub incoming: Vec<NeighborRecord>,
    pub outgoing: Vec<NeighborRecord>,
}

impl NodeDetails {
    pub fn degree(&self) -> usize {
        self.incoming.len() + self.outgoing.len()
    }
}

/// Neighborhood of `node_id`, labelling through the dataset's own label property.
pub fn get_neighborhood(dataset: &Dataset, node_id: &str) -> Result<NodeDetails, GraphError> {
    get_neighborhood_with(dataset, node_id, Some(dataset))
}

/// Neighborhood of `node_id`, labelling through `lookup` when given.
///
/// An identifier absent from the dataset yields empty connection lists.
pub fn get_neighborhood_with(
    dataset: &Dataset,
    node_id: &str,
    lookup: Option<&dyn LabelLookup>,
) -> Result<NodeDetails, GraphError> {
    if node_id.trim().is_empty() {
        return Err(GraphError::EmptyIdentifier);
    }
    if dataset.is_empty() {
        return Err(GraphError::EmptyDataset);
    }

    let outgoing = dataset
        .outgoing(node_id)
        .map(|t| {
            let node_label = if t.has_literal_object() {
                t.object.clone()
            } else {
                resolve_label_with(lookup, &t.object)
            };
            NeighborRecord {
                node_id: t.object.clone(),
                node_label,
                relationship_type: resolve_label_with(lookup, &t.predicate),
            }
        })
        .collect();

    let incoming = dataset
        .incoming(node_id)
        .map(|t| NeighborRecord {
            node_id: t.subject.clone(),
            node_label: resolve_label_with(lookup, &t.subject),
            relationship_type: resolve_label_with(lookup, &t.predicate),
        })
        .collect();

    Ok(NodeDetails {
        id: node_id.to_string(),
        label: resolve_label_with(lookup, node_id),
        incoming,
        outgoing,
    })
}
