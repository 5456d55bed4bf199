//! Configuration schema definitions.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::validate::ValidationError;

/// Configuration for one planning run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanConfig {
    /// Name of the generation strategy to dispatch.
    pub network_algorithm: String,

    #[serde(default)]
    pub network_parameters: NetworkParameters,

    /// Optional existing network to extend rather than replace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_networks: Option<ExistingNetworksDef>,

    /// CSV of demand nodes (`x,y,budget` columns).
    pub demand_nodes_file: PathBuf,

    /// Name of the external metric/demand model that produced the budgets.
    /// Carried for provenance; metric modeling is not part of this pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_model_parameters_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkParameters {
    /// Smallest viable subnetwork; components below this node count are
    /// discarded after generation. Inclusive threshold, must be >= 1.
    pub minimum_node_count: usize,
}

impl Default for NetworkParameters {
    fn default() -> Self {
        Self {
            minimum_node_count: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExistingNetworksDef {
    /// JSON node/edge description of the prior network.
    pub filename: PathBuf,

    /// Budget assigned to existing-network nodes. Default (absent) is the
    /// infinite sentinel: the grid can absorb any connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_value: Option<f64>,
}

impl PlanConfig {
    /// Load a config from a JSON or YAML file, by extension.
    pub fn from_path(path: &Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| ValidationError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(&content).map_err(|e| ValidationError::Malformed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
        } else {
            serde_yaml::from_str(&content).map_err(|e| ValidationError::Malformed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
        }
    }
}
