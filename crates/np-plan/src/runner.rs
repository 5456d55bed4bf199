//! End-to-end plan runs: configuration in, persisted dataset plus summary out.

use std::path::{Path, PathBuf};

use np_config::{PlanConfig, validate_config};
use np_core::{PlanError, PlanResult};
use np_generate::{StrategyRegistry, dispatch, filter_components};
use np_graph::merge_networks;
use np_store::DatasetStore;
use serde::Serialize;

use crate::demand::{build_demand_graph, read_demand_csv};
use crate::existing::load_existing_network;
use crate::persist::persist_topology;
use crate::realign::realign_ids;

/// Summary of one completed run, written as `plan-summary.json`.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub algorithm: String,
    pub projection: String,
    pub demand_node_count: usize,
    pub existing_node_count: usize,
    pub merged_node_count: usize,
    pub minimum_node_count: usize,
    pub subnets: usize,
    pub proposed_segments: usize,
    pub existing_segments: usize,
    pub synthetic_nodes: usize,
    pub total_proposed_weight: f64,
}

/// Drives the whole pipeline for one configuration.
pub struct PlanRunner {
    config: PlanConfig,
    output_dir: PathBuf,
    registry: StrategyRegistry,
}

impl PlanRunner {
    pub fn new(config: PlanConfig, output_dir: impl Into<PathBuf>) -> Self {
        Self::with_registry(config, output_dir, StrategyRegistry::builtin())
    }

    /// A runner with a caller-provided registry, for externally registered
    /// strategies.
    pub fn with_registry(
        config: PlanConfig,
        output_dir: impl Into<PathBuf>,
        registry: StrategyRegistry,
    ) -> Self {
        Self {
            config,
            output_dir: output_dir.into(),
            registry,
        }
    }

    pub fn dataset_dir(&self) -> PathBuf {
        self.output_dir.join("dataset")
    }

    /// Execute the pipeline. The first failing stage aborts the run; the
    /// dataset directory then holds only subnets committed before the failure.
    pub fn run(&self) -> PlanResult<PlanReport> {
        validate_config(&self.config).map_err(PlanError::from)?;
        std::fs::create_dir_all(&self.output_dir)?;

        let records = read_demand_csv(&self.config.demand_nodes_file)?;
        let (demand_graph, srs) = build_demand_graph(&records)?;
        tracing::info!(
            nodes = records.len(),
            projection = srs.name(),
            "demand graph built"
        );

        let seed: Vec<([f64; 2], f64)> =
            records.iter().map(|r| ([r.x, r.y], r.budget)).collect();
        let mut store = DatasetStore::create(&self.dataset_dir(), &seed)?;

        let existing = self
            .config
            .existing_networks
            .as_ref()
            .map(load_existing_network)
            .transpose()?;
        if let Some(network) = &existing {
            tracing::info!(
                nodes = network.graph.node_count(),
                edges = network.graph.edge_count(),
                "existing network loaded"
            );
        }

        let outcome = merge_networks(&demand_graph, existing.as_ref().map(|e| &e.graph))?;
        tracing::info!(
            nodes = outcome.graph.node_count(),
            subproblems = outcome.subproblems.len(),
            "networks merged"
        );

        let strategy = self.registry.get(&self.config.network_algorithm)?;
        let forest = dispatch(
            strategy,
            &outcome.graph,
            Some(&outcome.subproblems),
            Some(&outcome.index),
        )?;
        tracing::info!(
            algorithm = strategy.name(),
            edges = forest.edge_count(),
            "network generated"
        );

        let minimum = self.config.network_parameters.minimum_node_count;
        let filtered = filter_components(&forest, minimum);

        let realignment = realign_ids(&filtered, &outcome.origins, existing.as_ref())?;
        let stats = persist_topology(&mut store, &filtered, &realignment, existing.as_ref())?;
        tracing::info!(
            subnets = stats.subnets,
            proposed = stats.proposed_segments,
            existing = stats.existing_segments,
            "topology persisted"
        );

        let report = PlanReport {
            algorithm: self.config.network_algorithm.clone(),
            projection: srs.name().to_string(),
            demand_node_count: records.len(),
            existing_node_count: existing
                .as_ref()
                .map(|e| e.graph.node_count())
                .unwrap_or(0),
            merged_node_count: outcome.graph.node_count(),
            minimum_node_count: minimum,
            subnets: stats.subnets,
            proposed_segments: stats.proposed_segments,
            existing_segments: stats.existing_segments,
            synthetic_nodes: stats.synthetic_nodes,
            total_proposed_weight: stats.total_proposed_weight,
        };
        self.write_summary(&report)?;
        np_store::save_segments_csv(&store, &self.output_dir.join("segments.csv"), None)
            .map_err(PlanError::from)?;

        Ok(report)
    }

    fn write_summary(&self, report: &PlanReport) -> PlanResult<()> {
        let json = serde_json::to_string_pretty(report).map_err(|e| PlanError::StoreWrite {
            what: format!("plan summary: {e}"),
        })?;
        std::fs::write(self.summary_path(), json)?;
        Ok(())
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join("plan-summary.json")
    }
}

/// Convenience entry point: load a config file and run it.
pub fn run_from_config_file(config_path: &Path, output_dir: &Path) -> PlanResult<PlanReport> {
    let config = PlanConfig::from_path(config_path).map_err(PlanError::from)?;
    PlanRunner::new(config, output_dir).run()
}
