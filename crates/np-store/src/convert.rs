//! Store → graph read-back.

use std::collections::BTreeMap;

use np_core::{NodeId, PlanResult, SYNTHETIC_BUDGET, StoreId};
use np_graph::{SpatialGraph, Srs};

use crate::store::DatasetStore;
use crate::types::EndpointRef;

/// Convert a persisted network back into a `SpatialGraph`.
///
/// Nodes (including synthetic ones) get dense 0-based graph ids in store-id
/// order. Only proposed segments whose endpoints both live in the store's id
/// space become edges; segments touching existing-network labels are not
/// representable without the existing network itself and are skipped.
pub fn store_to_graph(store: &DatasetStore, srs: Srs) -> PlanResult<SpatialGraph> {
    let mut graph = SpatialGraph::new(srs);
    let mut to_graph_id: BTreeMap<StoreId, NodeId> = BTreeMap::new();

    for (i, record) in store.iter_nodes(true).enumerate() {
        let id = NodeId::from_index(i as u32);
        let budget = record.budget.unwrap_or(SYNTHETIC_BUDGET);
        graph.add_node(id, [record.x, record.y], budget)?;
        to_graph_id.insert(record.id, id);
    }

    for segment in store.iter_segments(Some(false)) {
        if let (EndpointRef::Store(a), EndpointRef::Store(b)) = (&segment.a, &segment.b) {
            if let (Some(&ga), Some(&gb)) = (to_graph_id.get(a), to_graph_id.get(b)) {
                graph.add_edge(ga, gb, segment.weight, false)?;
            }
        }
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DatasetStore;

    #[test]
    fn round_trips_nodes_and_proposed_segments() {
        let dir = tempfile::tempdir().unwrap();
        let mut store =
            DatasetStore::create(dir.path(), &[([0.0, 0.0], 10.0), ([1.0, 0.0], 20.0)]).unwrap();

        let mut txn = store.begin();
        let subnet = txn.new_subnet();
        let junction = txn.add_node([0.5, 0.0], true);
        txn.add_segment(
            subnet,
            EndpointRef::Store(StoreId::new(1).unwrap()),
            EndpointRef::Store(junction.id),
            0.5,
            false,
        );
        txn.add_segment(
            subnet,
            EndpointRef::Store(junction.id),
            EndpointRef::Store(StoreId::new(2).unwrap()),
            0.5,
            false,
        );
        txn.add_segment(
            subnet,
            EndpointRef::Store(StoreId::new(1).unwrap()),
            EndpointRef::Existing("grid-3".into()),
            2.0,
            true,
        );
        txn.commit().unwrap();

        let graph = store_to_graph(&store, Srs::FlatEarthPlanar).unwrap();
        assert_eq!(graph.node_count(), 3);
        // Existing-labeled segment skipped; the two store-space edges kept.
        assert_eq!(graph.edge_count(), 2);
        let synthetic = graph
            .nodes()
            .filter(|n| np_core::is_synthetic_budget(n.budget))
            .count();
        assert_eq!(synthetic, 1);
    }
}
