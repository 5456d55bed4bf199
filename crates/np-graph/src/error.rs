//! Graph-specific error types.

use np_core::{NodeId, PlanError, Real};

/// Graph construction and validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("Duplicate node id {node}")]
    DuplicateNode { node: NodeId },

    #[error("Edge {a}-{b} references a node that does not exist")]
    MissingEndpoint { a: NodeId, b: NodeId },

    #[error("Self-loop on node {node}")]
    SelfLoop { node: NodeId },

    #[error("Node {node} has a non-finite coordinate ({x}, {y})")]
    NonFiniteCoord { node: NodeId, x: Real, y: Real },

    #[error("Node {node} has an invalid budget {value} (must be non-negative, NaN forbidden)")]
    InvalidBudget { node: NodeId, value: Real },

    #[error("Edge {a}-{b} has an invalid weight {weight} (must be finite and non-negative)")]
    InvalidWeight { a: NodeId, b: NodeId, weight: Real },
}

impl From<GraphError> for PlanError {
    fn from(err: GraphError) -> Self {
        PlanError::InvalidInput {
            what: err.to_string(),
        }
    }
}
