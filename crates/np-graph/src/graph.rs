//! Core spatial graph data structures.

use std::collections::BTreeMap;

use np_core::{NodeId, Real};
use petgraph::unionfind::UnionFind;

use crate::error::GraphError;
use crate::projection::Srs;

/// A node: unique id, 2D coordinate, and a budget. An infinite budget marks a
/// synthetic/junction node with no demand of its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialNode {
    pub id: NodeId,
    pub coord: [Real; 2],
    pub budget: Real,
}

/// An undirected edge between two nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialEdge {
    pub a: NodeId,
    pub b: NodeId,
    /// Geometric or cost distance; finite, non-negative.
    pub weight: Real,
    /// True for edges carried over from a previously built network.
    pub is_existing: bool,
}

/// An undirected spatial graph with one declared spatial reference.
///
/// Node ids need not be contiguous: filtering and merging produce graphs whose
/// surviving ids keep their original values. Nodes are kept in an ordered map
/// so iteration is deterministic.
#[derive(Debug, Clone)]
pub struct SpatialGraph {
    srs: Srs,
    nodes: BTreeMap<NodeId, SpatialNode>,
    edges: Vec<SpatialEdge>,
}

impl SpatialGraph {
    /// Create an empty graph in the given spatial reference.
    pub fn new(srs: Srs) -> Self {
        Self {
            srs,
            nodes: BTreeMap::new(),
            edges: Vec::new(),
        }
    }

    pub fn srs(&self) -> Srs {
        self.srs
    }

    /// Add a node. Ids are unique within one graph instance.
    pub fn add_node(
        &mut self,
        id: NodeId,
        coord: [Real; 2],
        budget: Real,
    ) -> Result<(), GraphError> {
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode { node: id });
        }
        self.nodes.insert(id, SpatialNode { id, coord, budget });
        Ok(())
    }

    /// Add an undirected edge. Both endpoints must already exist.
    pub fn add_edge(
        &mut self,
        a: NodeId,
        b: NodeId,
        weight: Real,
        is_existing: bool,
    ) -> Result<(), GraphError> {
        if a == b {
            return Err(GraphError::SelfLoop { node: a });
        }
        if !self.nodes.contains_key(&a) || !self.nodes.contains_key(&b) {
            return Err(GraphError::MissingEndpoint { a, b });
        }
        self.edges.push(SpatialEdge {
            a,
            b,
            weight,
            is_existing,
        });
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&SpatialNode> {
        self.nodes.get(&id)
    }

    pub fn coord(&self, id: NodeId) -> Option<[Real; 2]> {
        self.nodes.get(&id).map(|n| n.coord)
    }

    pub fn budget(&self, id: NodeId) -> Option<Real> {
        self.nodes.get(&id).map(|n| n.budget)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &SpatialNode> {
        self.nodes.values()
    }

    /// Node ids in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn edges(&self) -> &[SpatialEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Connected components as sorted id lists, ordered by smallest member.
    ///
    /// Isolated nodes form singleton components.
    pub fn connected_components(&self) -> Vec<Vec<NodeId>> {
        let ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        let dense: BTreeMap<NodeId, usize> =
            ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();

        let mut uf = UnionFind::<usize>::new(ids.len());
        for edge in &self.edges {
            uf.union(dense[&edge.a], dense[&edge.b]);
        }

        let mut by_root: BTreeMap<usize, Vec<NodeId>> = BTreeMap::new();
        for (id, &i) in &dense {
            by_root.entry(uf.find(i)).or_default().push(*id);
        }

        // Members are already sorted (dense map iterates in id order);
        // order components by their smallest member.
        let mut components: Vec<Vec<NodeId>> = by_root.into_values().collect();
        components.sort_by_key(|c| c[0]);
        components
    }

    /// The induced subgraph over the given node ids: those nodes plus every
    /// edge with both endpoints inside the set. Coordinates and budgets are
    /// preserved; ids keep their original values.
    pub fn subgraph<'a>(&self, ids: impl IntoIterator<Item = &'a NodeId>) -> SpatialGraph {
        let keep: BTreeMap<NodeId, SpatialNode> = ids
            .into_iter()
            .filter_map(|id| self.nodes.get(id).map(|n| (*id, *n)))
            .collect();
        let edges = self
            .edges
            .iter()
            .filter(|e| keep.contains_key(&e.a) && keep.contains_key(&e.b))
            .copied()
            .collect();
        SpatialGraph {
            srs: self.srs,
            nodes: keep,
            edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(i: u32) -> NodeId {
        NodeId::from_index(i)
    }

    fn line_graph(count: u32) -> SpatialGraph {
        let mut g = SpatialGraph::new(Srs::FlatEarthPlanar);
        for i in 0..count {
            g.add_node(n(i), [i as f64, 0.0], 1.0).unwrap();
        }
        for i in 1..count {
            g.add_edge(n(i - 1), n(i), 1.0, false).unwrap();
        }
        g
    }

    #[test]
    fn duplicate_node_rejected() {
        let mut g = SpatialGraph::new(Srs::FlatEarthPlanar);
        g.add_node(n(0), [0.0, 0.0], 1.0).unwrap();
        let err = g.add_node(n(0), [1.0, 1.0], 2.0).unwrap_err();
        assert_eq!(err, GraphError::DuplicateNode { node: n(0) });
    }

    #[test]
    fn edge_requires_endpoints() {
        let mut g = SpatialGraph::new(Srs::FlatEarthPlanar);
        g.add_node(n(0), [0.0, 0.0], 1.0).unwrap();
        assert!(matches!(
            g.add_edge(n(0), n(5), 1.0, false),
            Err(GraphError::MissingEndpoint { .. })
        ));
        assert!(matches!(
            g.add_edge(n(0), n(0), 1.0, false),
            Err(GraphError::SelfLoop { .. })
        ));
    }

    #[test]
    fn components_split_on_missing_edge() {
        let mut g = line_graph(4);
        // Second cluster: 10-11
        g.add_node(n(10), [10.0, 0.0], 1.0).unwrap();
        g.add_node(n(11), [11.0, 0.0], 1.0).unwrap();
        g.add_edge(n(10), n(11), 1.0, false).unwrap();
        // Isolated node
        g.add_node(n(20), [20.0, 0.0], 1.0).unwrap();

        let comps = g.connected_components();
        assert_eq!(comps.len(), 3);
        assert_eq!(comps[0], vec![n(0), n(1), n(2), n(3)]);
        assert_eq!(comps[1], vec![n(10), n(11)]);
        assert_eq!(comps[2], vec![n(20)]);
    }

    #[test]
    fn subgraph_keeps_ids_and_induced_edges() {
        let g = line_graph(4);
        let keep = [n(1), n(2), n(3)];
        let sub = g.subgraph(keep.iter());
        assert_eq!(sub.node_count(), 3);
        // Edges 1-2 and 2-3 survive; 0-1 does not.
        assert_eq!(sub.edge_count(), 2);
        assert_eq!(sub.coord(n(2)), g.coord(n(2)));
        assert!(!sub.contains(n(0)));
    }

    #[test]
    fn empty_subgraph_is_valid() {
        let g = line_graph(3);
        let sub = g.subgraph([].iter());
        assert_eq!(sub.node_count(), 0);
        assert_eq!(sub.edge_count(), 0);
        assert!(sub.connected_components().is_empty());
    }
}
