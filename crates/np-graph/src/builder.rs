//! Incremental spatial graph builder.

use np_core::{NodeId, Real};

use crate::error::GraphError;
use crate::graph::{SpatialGraph, SpatialNode};
use crate::projection::Srs;

/// Builder for constructing a spatial graph incrementally.
///
/// Ids are assigned 0-based in insertion order, matching the demand-record
/// order the store numbers 1-based; realignment between the two spaces happens
/// at the end of the pipeline. Call `build()` to validate and freeze.
#[derive(Debug)]
pub struct SpatialGraphBuilder {
    srs: Srs,
    nodes: Vec<SpatialNode>,
    edges: Vec<(NodeId, NodeId, Real, bool)>,
    next_node_id: u32,
}

impl SpatialGraphBuilder {
    /// Create a new empty builder for the given spatial reference.
    pub fn new(srs: Srs) -> Self {
        Self {
            srs,
            nodes: Vec::new(),
            edges: Vec::new(),
            next_node_id: 0,
        }
    }

    /// Add a node and return its 0-based id.
    pub fn add_node(&mut self, coord: [Real; 2], budget: Real) -> NodeId {
        let id = NodeId::from_index(self.next_node_id);
        self.next_node_id += 1;
        self.nodes.push(SpatialNode { id, coord, budget });
        id
    }

    /// Add an undirected edge between two previously added nodes.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: Real, is_existing: bool) {
        self.edges.push((a, b, weight, is_existing));
    }

    /// Validate and freeze into a `SpatialGraph`.
    pub fn build(self) -> Result<SpatialGraph, GraphError> {
        for node in &self.nodes {
            let [x, y] = node.coord;
            if !x.is_finite() || !y.is_finite() {
                return Err(GraphError::NonFiniteCoord { node: node.id, x, y });
            }
            // Infinite budget is the synthetic sentinel; NaN and negative are not.
            if node.budget.is_nan() || node.budget < 0.0 {
                return Err(GraphError::InvalidBudget {
                    node: node.id,
                    value: node.budget,
                });
            }
        }

        let mut graph = SpatialGraph::new(self.srs);
        for node in self.nodes {
            graph.add_node(node.id, node.coord, node.budget)?;
        }
        for (a, b, weight, is_existing) in self.edges {
            if !weight.is_finite() || weight < 0.0 {
                return Err(GraphError::InvalidWeight { a, b, weight });
            }
            graph.add_edge(a, b, weight, is_existing)?;
        }
        Ok(graph)
    }
}
