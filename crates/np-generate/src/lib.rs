//! np-generate: network generation strategies and component filtering.
//!
//! Provides:
//! - The `NetworkStrategy` contract and a name-keyed registry
//! - Built-in strategies (minimum spanning forest, trivial spanning tree)
//! - Post-generation forest verification (`dispatch`)
//! - Minimum-node-count component filtering

pub mod filter;
pub mod msf;
pub mod spanning;
pub mod strategy;

pub use filter::filter_components;
pub use msf::MinSpanningForest;
pub use spanning::SpanningTree;
pub use strategy::{NetworkStrategy, StrategyRegistry, dispatch};
