//! Minimum spanning forest under a budget constraint.
//!
//! Kruskal-style: candidate edges come from the spatial index (k nearest
//! neighbors per node, all pairs without an index), sorted by weight, admitted
//! through a union-find unless they would close a cycle or overrun the pooled
//! budget of the component they would create. Existing-network edges are
//! retained up front and cost nothing against any budget.

use std::collections::{BTreeMap, BTreeSet};

use np_core::{NodeId, PlanResult, Real};
use np_graph::{SpatialGraph, SpatialIndex, distance};
use petgraph::unionfind::UnionFind;

use crate::strategy::NetworkStrategy;

/// Budget-constrained minimum spanning forest.
#[derive(Debug, Clone)]
pub struct MinSpanningForest {
    /// Nearest neighbors considered per node when a spatial index is given.
    pub candidate_neighbors: usize,
}

impl Default for MinSpanningForest {
    fn default() -> Self {
        Self {
            candidate_neighbors: 10,
        }
    }
}

impl NetworkStrategy for MinSpanningForest {
    fn name(&self) -> &'static str {
        "min-spanning-forest"
    }

    fn generate(
        &self,
        graph: &SpatialGraph,
        subproblems: Option<&[Vec<NodeId>]>,
        index: Option<&SpatialIndex>,
    ) -> PlanResult<SpatialGraph> {
        let ids: Vec<NodeId> = graph.node_ids().collect();
        let dense: BTreeMap<NodeId, usize> =
            ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();

        let mut out = SpatialGraph::new(graph.srs());
        for node in graph.nodes() {
            out.add_node(node.id, node.coord, node.budget)?;
        }

        // Pooled budget and spent cost per union-find root.
        let mut uf = UnionFind::<usize>::new(ids.len());
        let mut pool: Vec<Real> = ids
            .iter()
            .map(|id| graph.budget(*id).unwrap_or(0.0))
            .collect();
        let mut spent: Vec<Real> = vec![0.0; ids.len()];

        // Retain existing topology; it is already paid for.
        for edge in graph.edges().iter().filter(|e| e.is_existing) {
            let (a, b) = (dense[&edge.a], dense[&edge.b]);
            let (ra, rb) = (uf.find(a), uf.find(b));
            out.add_edge(edge.a, edge.b, edge.weight, true)?;
            if ra != rb {
                let merged_pool = pool[ra] + pool[rb];
                let merged_spent = spent[ra] + spent[rb];
                uf.union(a, b);
                let r = uf.find(a);
                pool[r] = merged_pool;
                spent[r] = merged_spent;
            }
        }

        let group_of = subproblems.map(|groups| {
            let mut map: BTreeMap<NodeId, usize> = BTreeMap::new();
            for (g, members) in groups.iter().enumerate() {
                for id in members {
                    map.insert(*id, g);
                }
            }
            map
        });

        let mut candidates = candidate_edges(graph, index, self.candidate_neighbors);
        if let Some(group_of) = &group_of {
            candidates.retain(|(a, b, _)| group_of.get(a) == group_of.get(b));
        }
        candidates.sort_by(|x, y| x.2.total_cmp(&y.2).then(x.0.cmp(&y.0)).then(x.1.cmp(&y.1)));

        for (a, b, weight) in candidates {
            let (da, db) = (dense[&a], dense[&b]);
            let (ra, rb) = (uf.find(da), uf.find(db));
            if ra == rb {
                continue;
            }
            let merged_pool = pool[ra] + pool[rb];
            let merged_spent = spent[ra] + spent[rb] + weight;
            if merged_spent <= merged_pool {
                out.add_edge(a, b, weight, false)?;
                uf.union(da, db);
                let r = uf.find(da);
                pool[r] = merged_pool;
                spent[r] = merged_spent;
            }
        }

        Ok(out)
    }
}

/// Candidate proposed edges with their weights, deduplicated as (low, high).
fn candidate_edges(
    graph: &SpatialGraph,
    index: Option<&SpatialIndex>,
    neighbors: usize,
) -> Vec<(NodeId, NodeId, Real)> {
    let mut pairs: BTreeSet<(NodeId, NodeId)> = BTreeSet::new();

    match index {
        Some(index) => {
            for node in graph.nodes() {
                for (other, _) in index.nearest_iter(node.coord).take(neighbors + 1) {
                    if other == node.id {
                        continue;
                    }
                    let (lo, hi) = if node.id < other {
                        (node.id, other)
                    } else {
                        (other, node.id)
                    };
                    pairs.insert((lo, hi));
                }
            }
        }
        None => {
            let ids: Vec<NodeId> = graph.node_ids().collect();
            for (i, a) in ids.iter().enumerate() {
                for b in &ids[i + 1..] {
                    pairs.insert((*a, *b));
                }
            }
        }
    }

    pairs
        .into_iter()
        .filter_map(|(a, b)| {
            let ca = graph.coord(a)?;
            let cb = graph.coord(b)?;
            Some((a, b, distance(graph.srs(), ca, cb)))
        })
        .collect()
}
