//! Minimum-node-count component filtering.

use np_graph::SpatialGraph;

/// Keep only connected components with at least `min_node_count` nodes.
///
/// The comparison is inclusive: a component exactly at the threshold
/// survives. The output is the union of surviving components as one graph
/// with coordinates, budgets, and ids preserved; if nothing survives the
/// result is a valid zero-node graph, not an error.
pub fn filter_components(graph: &SpatialGraph, min_node_count: usize) -> SpatialGraph {
    let components = graph.connected_components();
    let mut keep = Vec::new();
    let mut discarded = 0usize;
    for component in &components {
        if component.len() >= min_node_count {
            keep.extend(component.iter().copied());
        } else {
            discarded += 1;
        }
    }
    tracing::debug!(
        total = components.len(),
        discarded,
        min_node_count,
        "filtered subnetworks below minimum node count"
    );
    graph.subgraph(keep.iter())
}
