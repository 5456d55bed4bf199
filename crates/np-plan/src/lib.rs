//! np-plan: the planning pipeline for netplan.
//!
//! Strictly sequential batch run over a fixed input snapshot:
//!
//! resolve projection → build demand graph → load existing network →
//! merge → dispatch generation strategy → filter components →
//! realign identifiers → persist topology.
//!
//! Each stage consumes immutable input and returns a newly constructed
//! output; any failure aborts the whole run and leaves partially written
//! store output undefined.

pub mod demand;
pub mod existing;
pub mod persist;
pub mod realign;
pub mod runner;

pub use demand::{DemandRecord, build_demand_graph, read_demand_csv};
pub use existing::{ExistingNetwork, load_existing_network};
pub use persist::{PersistStats, persist_topology};
pub use realign::{Realignment, realign_ids};
pub use runner::{PlanReport, PlanRunner, run_from_config_file};
