//! Generation strategy contract and registry.
//!
//! A strategy takes the merged graph by reference together with the optional
//! sub-problem partition and spatial index, and returns a new graph that must
//! be a forest: no cycles, node coordinates and budgets carried over from the
//! input for every id it keeps. Strategies never mutate their input.

use std::collections::BTreeMap;

use np_core::{NodeId, PlanError, PlanResult};
use np_graph::{SpatialGraph, SpatialIndex};
use petgraph::unionfind::UnionFind;

use crate::msf::MinSpanningForest;
use crate::spanning::SpanningTree;

/// A pluggable network-generation algorithm.
pub trait NetworkStrategy {
    /// Registry key for this strategy.
    fn name(&self) -> &'static str;

    /// Produce the proposed-plus-retained-existing forest for the merged
    /// graph. Must not mutate the input; must not change the meaning of any
    /// id it carries over.
    fn generate(
        &self,
        graph: &SpatialGraph,
        subproblems: Option<&[Vec<NodeId>]>,
        index: Option<&SpatialIndex>,
    ) -> PlanResult<SpatialGraph>;
}

impl std::fmt::Debug for dyn NetworkStrategy + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkStrategy")
            .field("name", &self.name())
            .finish()
    }
}

/// Fixed name-keyed registry of generation strategies.
pub struct StrategyRegistry {
    strategies: BTreeMap<&'static str, Box<dyn NetworkStrategy>>,
}

impl StrategyRegistry {
    /// Registry with the built-in strategies.
    pub fn builtin() -> Self {
        let mut registry = Self {
            strategies: BTreeMap::new(),
        };
        registry.register(Box::new(MinSpanningForest::default()));
        registry.register(Box::new(SpanningTree));
        registry
    }

    pub fn register(&mut self, strategy: Box<dyn NetworkStrategy>) {
        self.strategies.insert(strategy.name(), strategy);
    }

    /// Look up a strategy by configured name.
    pub fn get(&self, name: &str) -> PlanResult<&dyn NetworkStrategy> {
        self.strategies
            .get(name)
            .map(|s| s.as_ref())
            .ok_or_else(|| PlanError::Configuration {
                what: format!(
                    "unknown network_algorithm '{name}' (known: {})",
                    self.names().join(", ")
                ),
            })
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.keys().copied().collect()
    }
}

/// Run a strategy and verify its output against the generation contract.
///
/// Checks that the result is a forest and that every carried-over node keeps
/// the coordinate and budget it had in the input graph. A violation is a
/// structural error in the strategy, not in the caller's data.
pub fn dispatch(
    strategy: &dyn NetworkStrategy,
    graph: &SpatialGraph,
    subproblems: Option<&[Vec<NodeId>]>,
    index: Option<&SpatialIndex>,
) -> PlanResult<SpatialGraph> {
    let forest = strategy.generate(graph, subproblems, index)?;
    verify_forest(strategy.name(), &forest)?;
    verify_nodes_carried_over(strategy.name(), graph, &forest)?;
    Ok(forest)
}

fn verify_forest(name: &str, forest: &SpatialGraph) -> PlanResult<()> {
    let ids: Vec<NodeId> = forest.node_ids().collect();
    let dense: BTreeMap<NodeId, usize> = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
    let mut uf = UnionFind::<usize>::new(ids.len());
    for edge in forest.edges() {
        if !uf.union(dense[&edge.a], dense[&edge.b]) {
            return Err(PlanError::structural(format!(
                "generation dispatcher: strategy '{name}' produced a cycle through edge {}-{}",
                edge.a, edge.b
            )));
        }
    }
    Ok(())
}

fn verify_nodes_carried_over(
    name: &str,
    input: &SpatialGraph,
    forest: &SpatialGraph,
) -> PlanResult<()> {
    for node in forest.nodes() {
        if let Some(original) = input.node(node.id) {
            if original.coord != node.coord || original.budget != node.budget {
                return Err(PlanError::structural(format!(
                    "generation dispatcher: strategy '{name}' changed attributes of node {}",
                    node.id
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use np_graph::{Srs, SpatialGraphBuilder};

    struct CyclicStrategy;

    impl NetworkStrategy for CyclicStrategy {
        fn name(&self) -> &'static str {
            "cyclic"
        }

        fn generate(
            &self,
            graph: &SpatialGraph,
            _subproblems: Option<&[Vec<NodeId>]>,
            _index: Option<&SpatialIndex>,
        ) -> PlanResult<SpatialGraph> {
            let mut out = graph.clone();
            let ids: Vec<NodeId> = out.node_ids().collect();
            for w in ids.windows(2) {
                out.add_edge(w[0], w[1], 1.0, false).map_err(PlanError::from)?;
            }
            out.add_edge(ids[ids.len() - 1], ids[0], 1.0, false)
                .map_err(PlanError::from)?;
            Ok(out)
        }
    }

    fn triangle() -> SpatialGraph {
        let mut b = SpatialGraphBuilder::new(Srs::FlatEarthPlanar);
        b.add_node([0.0, 0.0], 1.0);
        b.add_node([1.0, 0.0], 1.0);
        b.add_node([0.0, 1.0], 1.0);
        b.build().unwrap()
    }

    #[test]
    fn unknown_strategy_is_configuration_error() {
        let registry = StrategyRegistry::builtin();
        let err = registry.get("nonesuch").unwrap_err();
        assert!(matches!(err, PlanError::Configuration { .. }));
        assert!(format!("{err}").contains("nonesuch"));
    }

    #[test]
    fn builtin_names_registered() {
        let registry = StrategyRegistry::builtin();
        let names = registry.names();
        assert!(names.contains(&"min-spanning-forest"));
        assert!(names.contains(&"spanning-tree"));
    }

    #[test]
    fn dispatch_rejects_cyclic_output() {
        let graph = triangle();
        let err = dispatch(&CyclicStrategy, &graph, None, None).unwrap_err();
        assert!(matches!(err, PlanError::StructuralIntegrity { .. }));
        assert!(format!("{err}").contains("cycle"));
    }

    #[test]
    fn dispatch_accepts_builtin_output() {
        let graph = triangle();
        let registry = StrategyRegistry::builtin();
        let strategy = registry.get("spanning-tree").unwrap();
        let forest = dispatch(strategy, &graph, None, None).unwrap();
        assert!(forest.edge_count() < forest.node_count().max(1));
    }
}
