//! Collision-free merge of an existing network with demand nodes.
//!
//! The existing network arrives with its own 0-based ids; merging offsets them
//! past the demand range and records each combined id's origin as a
//! [`NamespacedId`]. The tag exists only in the merge outcome: the combined
//! graph itself uses plain ids, and downstream stages consult the origin map
//! when they need to know which id space a node came from.

use std::collections::BTreeMap;

use np_core::{NamespacedId, NodeId, PlanError, PlanResult};

use crate::graph::SpatialGraph;
use crate::indexing::SpatialIndex;

/// Result of merging the demand graph with an optional existing network.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// The combined graph. Owned here for the duration of generation.
    pub graph: SpatialGraph,
    /// Origin of every combined id. Demand ids pass through unchanged;
    /// existing ids record the id within the namespaced existing graph.
    pub origins: BTreeMap<NodeId, NamespacedId>,
    /// Disjoint candidate sub-problems: connected groupings suitable for
    /// independent generation. Identity partition when no existing network
    /// is present.
    pub subproblems: Vec<Vec<NodeId>>,
    /// R-tree over all combined node coordinates.
    pub index: SpatialIndex,
}

/// Merge the demand graph with an optional namespaced existing network.
///
/// Fails with `ProjectionMismatch` if the two graphs declare different
/// spatial references.
pub fn merge_networks(
    demand: &SpatialGraph,
    existing: Option<&SpatialGraph>,
) -> PlanResult<MergeOutcome> {
    let existing = existing.filter(|g| g.node_count() > 0);

    if let Some(existing) = existing {
        if existing.srs() != demand.srs() {
            return Err(PlanError::ProjectionMismatch {
                left: demand.srs().name().to_string(),
                right: existing.srs().name().to_string(),
            });
        }
    }

    let mut combined = SpatialGraph::new(demand.srs());
    let mut origins = BTreeMap::new();

    for node in demand.nodes() {
        combined.add_node(node.id, node.coord, node.budget)?;
        origins.insert(node.id, NamespacedId::Demand(node.id));
    }
    for edge in demand.edges() {
        combined.add_edge(edge.a, edge.b, edge.weight, edge.is_existing)?;
    }

    let mut existing_ids: Vec<NodeId> = Vec::new();
    if let Some(existing) = existing {
        // Offset past the demand range so the two id spaces cannot collide.
        let offset = demand.node_ids().map(|id| id.index() + 1).max().unwrap_or(0);
        let remap = |id: NodeId| NodeId::from_index(offset + id.index());

        for node in existing.nodes() {
            let combined_id = remap(node.id);
            combined.add_node(combined_id, node.coord, node.budget)?;
            origins.insert(combined_id, NamespacedId::Existing(node.id));
            existing_ids.push(combined_id);
        }
        for edge in existing.edges() {
            combined.add_edge(remap(edge.a), remap(edge.b), edge.weight, true)?;
        }
    }

    let subproblems = partition_subproblems(&combined, demand, &existing_ids);
    let index = SpatialIndex::build(&combined);

    Ok(MergeOutcome {
        graph: combined,
        origins,
        subproblems,
        index,
    })
}

/// Group the combined graph into disjoint candidate sub-problems.
///
/// With no existing network the partition is the identity. Otherwise each
/// existing-network component forms a group together with the demand nodes
/// whose nearest existing node lies in that component.
fn partition_subproblems(
    combined: &SpatialGraph,
    demand: &SpatialGraph,
    existing_ids: &[NodeId],
) -> Vec<Vec<NodeId>> {
    if existing_ids.is_empty() {
        return vec![combined.node_ids().collect()];
    }

    let existing_part = combined.subgraph(existing_ids.iter());
    let components = existing_part.connected_components();
    let mut component_of: BTreeMap<NodeId, usize> = BTreeMap::new();
    for (i, component) in components.iter().enumerate() {
        for id in component {
            component_of.insert(*id, i);
        }
    }

    let existing_index = SpatialIndex::from_points(
        existing_part.nodes().map(|n| (n.id, n.coord)),
    );

    let mut groups: Vec<Vec<NodeId>> = components;
    for node in demand.nodes() {
        if let Some((nearest, _)) = existing_index.nearest(node.coord) {
            groups[component_of[&nearest]].push(node.id);
        }
    }
    for group in &mut groups {
        group.sort();
    }
    groups
}
