//! Existing-network loading and namespacing.
//!
//! The prior network arrives with arbitrary native node labels. Loading
//! assigns dense 0-based graph ids (the `existing` namespace) and keeps the
//! native labels so the persistence stage can reference existing nodes
//! without ever remapping them into the store's id space.

use std::collections::BTreeMap;

use np_config::ExistingNetworksDef;
use np_core::{NodeId, PlanError, PlanResult, SYNTHETIC_BUDGET};
use np_graph::{SpatialGraph, SpatialGraphBuilder, resolve_srs};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ExistingNetworkFile {
    nodes: Vec<ExistingNodeDef>,
    #[serde(default)]
    edges: Vec<ExistingEdgeDef>,
}

#[derive(Debug, Deserialize)]
struct ExistingNodeDef {
    id: String,
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct ExistingEdgeDef {
    a: String,
    b: String,
    weight: f64,
}

/// A loaded existing network: dense 0-based graph ids plus the native label
/// for each id.
#[derive(Debug, Clone)]
pub struct ExistingNetwork {
    pub graph: SpatialGraph,
    /// `labels[i]` is the native label of graph id `i`.
    pub labels: Vec<String>,
}

impl ExistingNetwork {
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.labels.get(id.index() as usize).map(String::as_str)
    }
}

/// Load an existing network from its JSON description.
///
/// Every node budget is the configured `budget_value`, defaulting to the
/// infinite sentinel: the grid absorbs any connection. The projection is
/// resolved from the file's own coordinates; a disagreement with the demand
/// graph surfaces later as a merge failure.
pub fn load_existing_network(def: &ExistingNetworksDef) -> PlanResult<ExistingNetwork> {
    let content =
        std::fs::read_to_string(&def.filename).map_err(|e| PlanError::InvalidInput {
            what: format!("existing network file {}: {e}", def.filename.display()),
        })?;
    let file: ExistingNetworkFile =
        serde_json::from_str(&content).map_err(|e| PlanError::InvalidInput {
            what: format!("existing network file {}: {e}", def.filename.display()),
        })?;

    if file.nodes.is_empty() {
        return Err(PlanError::invalid_input(format!(
            "existing network file {} contains no nodes",
            def.filename.display()
        )));
    }

    let coords: Vec<[f64; 2]> = file.nodes.iter().map(|n| [n.x, n.y]).collect();
    let srs = resolve_srs(&coords)?;
    let budget = def.budget_value.unwrap_or(SYNTHETIC_BUDGET);

    let mut builder = SpatialGraphBuilder::new(srs);
    let mut labels = Vec::with_capacity(file.nodes.len());
    let mut by_label: BTreeMap<&str, NodeId> = BTreeMap::new();
    for node in &file.nodes {
        if by_label.contains_key(node.id.as_str()) {
            return Err(PlanError::invalid_input(format!(
                "existing network: duplicate node label '{}'",
                node.id
            )));
        }
        let graph_id = builder.add_node([node.x, node.y], budget);
        by_label.insert(node.id.as_str(), graph_id);
        labels.push(node.id.clone());
    }

    for edge in &file.edges {
        let a = by_label.get(edge.a.as_str()).ok_or_else(|| {
            PlanError::invalid_input(format!(
                "existing network: edge references unknown node '{}'",
                edge.a
            ))
        })?;
        let b = by_label.get(edge.b.as_str()).ok_or_else(|| {
            PlanError::invalid_input(format!(
                "existing network: edge references unknown node '{}'",
                edge.b
            ))
        })?;
        builder.add_edge(*a, *b, edge.weight, true);
    }

    let graph = builder.build()?;
    Ok(ExistingNetwork { graph, labels })
}

#[cfg(test)]
mod tests {
    use super::*;
    use np_graph::Srs;

    fn write_network(dir: &std::path::Path, json: &str) -> ExistingNetworksDef {
        let path = dir.join("grid.json");
        std::fs::write(&path, json).unwrap();
        ExistingNetworksDef {
            filename: path,
            budget_value: None,
        }
    }

    #[test]
    fn loads_nodes_edges_and_labels() {
        let dir = tempfile::tempdir().unwrap();
        let def = write_network(
            dir.path(),
            r#"{"nodes": [{"id": "g-7", "x": 0.0, "y": 0.0},
                          {"id": "g-9", "x": 1.0, "y": 0.0}],
                "edges": [{"a": "g-7", "b": "g-9", "weight": 3.5}]}"#,
        );
        let network = load_existing_network(&def).unwrap();
        assert_eq!(network.graph.node_count(), 2);
        assert_eq!(network.graph.edge_count(), 1);
        assert_eq!(network.graph.srs(), Srs::Wgs84Geographic);
        assert_eq!(network.label(NodeId::from_index(0)), Some("g-7"));
        assert_eq!(network.label(NodeId::from_index(1)), Some("g-9"));
        assert!(network.graph.edges()[0].is_existing);
        // Default budget is the infinite sentinel.
        assert!(np_core::is_synthetic_budget(
            network.graph.budget(NodeId::from_index(0)).unwrap()
        ));
    }

    #[test]
    fn unknown_edge_endpoint_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let def = write_network(
            dir.path(),
            r#"{"nodes": [{"id": "a", "x": 0.0, "y": 0.0}],
                "edges": [{"a": "a", "b": "ghost", "weight": 1.0}]}"#,
        );
        assert!(matches!(
            load_existing_network(&def),
            Err(PlanError::InvalidInput { .. })
        ));
    }

    #[test]
    fn duplicate_label_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let def = write_network(
            dir.path(),
            r#"{"nodes": [{"id": "a", "x": 0.0, "y": 0.0},
                          {"id": "a", "x": 1.0, "y": 0.0}]}"#,
        );
        assert!(matches!(
            load_existing_network(&def),
            Err(PlanError::InvalidInput { .. })
        ));
    }

    #[test]
    fn configured_budget_value_applies() {
        let dir = tempfile::tempdir().unwrap();
        let mut def = write_network(
            dir.path(),
            r#"{"nodes": [{"id": "a", "x": 0.0, "y": 0.0}]}"#,
        );
        def.budget_value = Some(25.0);
        let network = load_existing_network(&def).unwrap();
        assert_eq!(network.graph.budget(NodeId::from_index(0)), Some(25.0));
    }
}
