//! Identifier realignment back into the store's 1-based space.

use std::collections::{BTreeMap, BTreeSet};

use np_core::{NamespacedId, NodeId, PlanError, PlanResult, StoreId};
use np_graph::SpatialGraph;

use crate::existing::ExistingNetwork;

/// Resolution of every surviving graph id into its persisted form.
///
/// Demand-origin ids (and generation-introduced junction ids, which have no
/// origin entry) realign to store ids as `i + 1`. Existing-origin ids resolve
/// to their native labels and never enter the store space.
#[derive(Debug, Clone)]
pub struct Realignment {
    to_store: BTreeMap<NodeId, StoreId>,
    existing_labels: BTreeMap<NodeId, String>,
}

impl Realignment {
    pub fn store_id(&self, id: NodeId) -> Option<StoreId> {
        self.to_store.get(&id).copied()
    }

    pub fn existing_label(&self, id: NodeId) -> Option<&str> {
        self.existing_labels.get(&id).map(String::as_str)
    }

    pub fn store_mapped_count(&self) -> usize {
        self.to_store.len()
    }
}

/// Map every node of the filtered graph to its persisted identity.
///
/// The store-space mapping must be a bijection; a collision means some stage
/// corrupted the id space and processing aborts.
pub fn realign_ids(
    filtered: &SpatialGraph,
    origins: &BTreeMap<NodeId, NamespacedId>,
    existing: Option<&ExistingNetwork>,
) -> PlanResult<Realignment> {
    let mut to_store = BTreeMap::new();
    let mut existing_labels = BTreeMap::new();
    let mut seen: BTreeSet<StoreId> = BTreeSet::new();

    for id in filtered.node_ids() {
        match origins.get(&id) {
            Some(NamespacedId::Existing(native)) => {
                let label = existing
                    .and_then(|network| network.label(*native))
                    .ok_or_else(|| {
                        PlanError::structural(format!(
                            "identifier realigner: existing-origin node {id} has no native label"
                        ))
                    })?;
                existing_labels.insert(id, label.to_string());
            }
            // Demand-origin ids realign as i+1; generation-introduced
            // junctions have no origin entry and realign the same way.
            Some(NamespacedId::Demand(_)) | None => {
                let store_id = StoreId::from_node(id);
                if !seen.insert(store_id) {
                    return Err(PlanError::structural(format!(
                        "identifier realigner: store id {store_id} assigned twice"
                    )));
                }
                to_store.insert(id, store_id);
            }
        }
    }

    Ok(Realignment {
        to_store,
        existing_labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use np_graph::{Srs, SpatialGraphBuilder};

    fn n(i: u32) -> NodeId {
        NodeId::from_index(i)
    }

    #[test]
    fn demand_ids_realign_one_based() {
        let mut b = SpatialGraphBuilder::new(Srs::FlatEarthPlanar);
        b.add_node([0.0, 0.0], 1.0);
        b.add_node([1.0, 0.0], 2.0);
        let graph = b.build().unwrap();
        let origins: BTreeMap<NodeId, NamespacedId> = graph
            .node_ids()
            .map(|id| (id, NamespacedId::Demand(id)))
            .collect();

        let realignment = realign_ids(&graph, &origins, None).unwrap();
        assert_eq!(realignment.store_id(n(0)).unwrap().get(), 1);
        assert_eq!(realignment.store_id(n(1)).unwrap().get(), 2);
        assert_eq!(realignment.store_mapped_count(), 2);

        // Round trip: graph id -> store id -> graph id.
        for id in graph.node_ids() {
            assert_eq!(realignment.store_id(id).unwrap().to_node(), id);
        }
    }

    #[test]
    fn origin_less_ids_treated_as_junctions() {
        let mut b = SpatialGraphBuilder::new(Srs::FlatEarthPlanar);
        b.add_node([0.0, 0.0], 1.0);
        b.add_node([1.0, 0.0], np_core::SYNTHETIC_BUDGET);
        let graph = b.build().unwrap();
        // Only node 0 has an origin; node 1 was introduced by generation.
        let origins: BTreeMap<NodeId, NamespacedId> =
            [(n(0), NamespacedId::Demand(n(0)))].into_iter().collect();

        let realignment = realign_ids(&graph, &origins, None).unwrap();
        assert_eq!(realignment.store_id(n(1)).unwrap().get(), 2);
    }

    #[test]
    fn missing_existing_label_is_structural_error() {
        let mut b = SpatialGraphBuilder::new(Srs::FlatEarthPlanar);
        b.add_node([0.0, 0.0], np_core::SYNTHETIC_BUDGET);
        let graph = b.build().unwrap();
        let origins: BTreeMap<NodeId, NamespacedId> =
            [(n(0), NamespacedId::Existing(n(5)))].into_iter().collect();

        let err = realign_ids(&graph, &origins, None).unwrap_err();
        assert!(matches!(err, PlanError::StructuralIntegrity { .. }));
    }
}
