//! Spatial index over node coordinates.
//!
//! An R-tree supporting nearest-neighbor and within-distance queries, used by
//! the merger to partition sub-problems and by generation strategies to find
//! candidate connections. Queries operate on raw coordinates; callers decide
//! which distance metric the results feed into.

use np_core::{NodeId, Real};
use rstar::RTree;
use rstar::primitives::GeomWithData;

use crate::graph::SpatialGraph;

type IndexedPoint = GeomWithData<[Real; 2], NodeId>;

/// R-tree over the coordinates of one or more graphs' nodes.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: RTree<IndexedPoint>,
}

impl SpatialIndex {
    /// Bulk-load an index over all nodes of a graph.
    pub fn build(graph: &SpatialGraph) -> Self {
        Self::from_points(graph.nodes().map(|n| (n.id, n.coord)))
    }

    /// Build an index from explicit (id, coordinate) pairs.
    pub fn from_points(points: impl IntoIterator<Item = (NodeId, [Real; 2])>) -> Self {
        let items: Vec<IndexedPoint> = points
            .into_iter()
            .map(|(id, coord)| GeomWithData::new(coord, id))
            .collect();
        Self {
            tree: RTree::bulk_load(items),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Nearest node to a query point, with its coordinate.
    pub fn nearest(&self, point: [Real; 2]) -> Option<(NodeId, [Real; 2])> {
        self.tree
            .nearest_neighbor(&point)
            .map(|item| (item.data, *item.geom()))
    }

    /// Nodes in ascending distance order from a query point.
    pub fn nearest_iter(
        &self,
        point: [Real; 2],
    ) -> impl Iterator<Item = (NodeId, [Real; 2])> + '_ {
        self.tree
            .nearest_neighbor_iter(&point)
            .map(|item| (item.data, *item.geom()))
    }

    /// Nodes within squared coordinate distance of a query point.
    pub fn within(&self, point: [Real; 2], squared_radius: Real) -> Vec<NodeId> {
        self.tree
            .locate_within_distance(point, squared_radius)
            .map(|item| item.data)
            .collect()
    }
}
