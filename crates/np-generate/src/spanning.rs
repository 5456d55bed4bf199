//! Trivial spanning tree strategy.
//!
//! Connects every node with positive budget, attaching each node in id order
//! to the nearest node already placed. Zero-budget nodes are left out of the
//! output entirely; existing edges between retained nodes are carried over and
//! pre-joined so the result stays a forest.

use std::collections::BTreeMap;

use np_core::{NodeId, PlanResult, Real};
use np_graph::{SpatialGraph, SpatialIndex, distance};
use petgraph::unionfind::UnionFind;

use crate::strategy::NetworkStrategy;

/// Spanning tree over all positive-budget nodes, nearest-placed greedy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanningTree;

impl NetworkStrategy for SpanningTree {
    fn name(&self) -> &'static str {
        "spanning-tree"
    }

    fn generate(
        &self,
        graph: &SpatialGraph,
        _subproblems: Option<&[Vec<NodeId>]>,
        _index: Option<&SpatialIndex>,
    ) -> PlanResult<SpatialGraph> {
        let included: Vec<NodeId> = graph
            .nodes()
            .filter(|n| n.budget > 0.0)
            .map(|n| n.id)
            .collect();
        let dense: BTreeMap<NodeId, usize> = included
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, i))
            .collect();

        let mut out = SpatialGraph::new(graph.srs());
        for id in &included {
            let node = graph.node(*id).ok_or_else(|| {
                np_core::PlanError::structural(format!("spanning tree: node {id} vanished"))
            })?;
            out.add_node(node.id, node.coord, node.budget)?;
        }

        let mut uf = UnionFind::<usize>::new(included.len());
        for edge in graph.edges().iter().filter(|e| e.is_existing) {
            if let (Some(&a), Some(&b)) = (dense.get(&edge.a), dense.get(&edge.b)) {
                out.add_edge(edge.a, edge.b, edge.weight, true)?;
                uf.union(a, b);
            }
        }

        // Attach each node to the nearest already-placed node in a different
        // component, if any.
        let mut placed: Vec<(NodeId, [Real; 2])> = Vec::new();
        for id in &included {
            let coord = graph.coord(*id).ok_or_else(|| {
                np_core::PlanError::structural(format!("spanning tree: node {id} vanished"))
            })?;
            let mut best: Option<(NodeId, Real)> = None;
            for (other, other_coord) in &placed {
                if uf.find(dense[id]) == uf.find(dense[other]) {
                    continue;
                }
                let d = distance(graph.srs(), coord, *other_coord);
                if best.map(|(_, bd)| d < bd).unwrap_or(true) {
                    best = Some((*other, d));
                }
            }
            if let Some((other, weight)) = best {
                out.add_edge(*id, other, weight, false)?;
                uf.union(dense[id], dense[&other]);
            }
            placed.push((*id, coord));
        }

        Ok(out)
    }
}
