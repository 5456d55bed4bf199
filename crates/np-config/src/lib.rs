//! np-config: planning-run configuration for netplan.
//!
//! Schema (serde) plus boundary validation. The pipeline assumes a config
//! that passed [`validate::validate_config`]; deeper checks (e.g. whether the
//! named strategy exists) belong to the stages that consume the values.

pub mod schema;
pub mod validate;

pub use schema::{ExistingNetworksDef, NetworkParameters, PlanConfig};
pub use validate::{ValidationError, validate_config};
