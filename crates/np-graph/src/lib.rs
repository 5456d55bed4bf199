//! np-graph: spatial graph layer for netplan.
//!
//! Provides:
//! - `SpatialGraph` (nodes with coordinates + budgets, weighted edges)
//! - Incremental builder with validation
//! - Projection classification (geographic vs planar)
//! - R-tree spatial index for nearest-neighbor/range queries
//! - Collision-free merge of an existing network with demand nodes
//!
//! # Example
//!
//! ```
//! use np_graph::{SpatialGraphBuilder, Srs};
//!
//! let mut builder = SpatialGraphBuilder::new(Srs::FlatEarthPlanar);
//! let a = builder.add_node([0.0, 0.0], 10.0);
//! let b = builder.add_node([3.0, 4.0], 20.0);
//! builder.add_edge(a, b, 5.0, false);
//! let graph = builder.build().unwrap();
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod indexing;
pub mod merge;
pub mod projection;

// Re-exports for ergonomics
pub use builder::SpatialGraphBuilder;
pub use error::GraphError;
pub use graph::{SpatialEdge, SpatialGraph, SpatialNode};
pub use indexing::SpatialIndex;
pub use merge::{MergeOutcome, merge_networks};
pub use projection::{Srs, distance, resolve_srs};
