//! Topology persistence: two independent passes over the final topology.

use std::collections::BTreeSet;

use np_core::{NodeId, PlanError, PlanResult, is_synthetic_budget};
use np_graph::SpatialGraph;
use np_store::{DatasetStore, EndpointRef};

use crate::existing::ExistingNetwork;
use crate::realign::Realignment;

/// Counters from one persistence run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PersistStats {
    pub subnets: usize,
    pub existing_segments: usize,
    pub proposed_segments: usize,
    pub synthetic_nodes: usize,
    pub total_proposed_weight: f64,
}

/// Persist the final topology.
///
/// Existing pass: every edge of the namespaced existing network becomes one
/// segment under a dedicated subnet, `is_existing = true`, regardless of what
/// filtering did to the proposed topology.
///
/// Proposed pass: one subnet (and one transaction) per surviving component of
/// the filtered forest; synthetic junction records are created at first
/// encounter of an infinite-budget endpoint that has no store record yet; an
/// edge with two synthetic endpoints aborts before the containing subnet
/// commits.
pub fn persist_topology(
    store: &mut DatasetStore,
    filtered: &SpatialGraph,
    realignment: &Realignment,
    existing: Option<&ExistingNetwork>,
) -> PlanResult<PersistStats> {
    let mut stats = PersistStats::default();

    if let Some(network) = existing {
        if network.graph.edge_count() > 0 {
            let mut txn = store.begin();
            let subnet = txn.new_subnet();
            for edge in network.graph.edges() {
                let a = existing_endpoint(network, edge.a)?;
                let b = existing_endpoint(network, edge.b)?;
                txn.add_segment(subnet, a, b, edge.weight, true);
                stats.existing_segments += 1;
            }
            txn.commit().map_err(PlanError::from)?;
            stats.subnets += 1;
        }
    }

    // Endpoints that already own a store record (a demand record whose budget
    // is the infinite sentinel) need no junction record.
    let recorded: BTreeSet<u32> = store.iter_nodes(true).map(|n| n.id.get()).collect();

    let mut created_synthetic: BTreeSet<NodeId> = BTreeSet::new();
    for component in filtered.connected_components() {
        let members: BTreeSet<NodeId> = component.into_iter().collect();
        let proposed: Vec<_> = filtered
            .edges()
            .iter()
            .filter(|e| !e.is_existing && members.contains(&e.a))
            .collect();
        if proposed.is_empty() {
            continue;
        }

        let mut txn = store.begin();
        let subnet = txn.new_subnet();
        for edge in proposed {
            let synthetic_endpoints = [edge.a, edge.b]
                .into_iter()
                .filter(|id| {
                    filtered
                        .budget(*id)
                        .map(is_synthetic_budget)
                        .unwrap_or(false)
                })
                .collect::<Vec<_>>();

            // Edges are never composed of two synthetic nodes.
            if synthetic_endpoints.len() > 1 {
                return Err(PlanError::structural(format!(
                    "topology persister: edge {}-{} has two synthetic endpoints",
                    edge.a, edge.b
                )));
            }

            for id in synthetic_endpoints {
                // Only junctions in the store space need records; existing
                // nodes already exist on the grid side.
                let Some(store_id) = realignment.store_id(id) else {
                    continue;
                };
                if recorded.contains(&store_id.get()) {
                    continue;
                }
                if created_synthetic.insert(id) {
                    let coord = filtered.coord(id).ok_or_else(|| {
                        PlanError::structural(format!(
                            "topology persister: synthetic node {id} has no coordinate"
                        ))
                    })?;
                    txn.add_node_with_id(store_id, coord, true)
                        .map_err(PlanError::from)?;
                    stats.synthetic_nodes += 1;
                }
            }

            let a = persisted_endpoint(realignment, edge.a)?;
            let b = persisted_endpoint(realignment, edge.b)?;
            txn.add_segment(subnet, a, b, edge.weight, false);
            stats.proposed_segments += 1;
            stats.total_proposed_weight += edge.weight;
        }
        txn.commit().map_err(PlanError::from)?;
        stats.subnets += 1;
    }

    Ok(stats)
}

fn existing_endpoint(network: &ExistingNetwork, id: NodeId) -> PlanResult<EndpointRef> {
    network
        .label(id)
        .map(|label| EndpointRef::Existing(label.to_string()))
        .ok_or_else(|| {
            PlanError::structural(format!(
                "topology persister: existing node {id} has no native label"
            ))
        })
}

fn persisted_endpoint(realignment: &Realignment, id: NodeId) -> PlanResult<EndpointRef> {
    if let Some(store_id) = realignment.store_id(id) {
        return Ok(EndpointRef::Store(store_id));
    }
    if let Some(label) = realignment.existing_label(id) {
        return Ok(EndpointRef::Existing(label.to_string()));
    }
    Err(PlanError::structural(format!(
        "topology persister: node {id} was never realigned"
    )))
}
