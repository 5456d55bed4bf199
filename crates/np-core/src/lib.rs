//! np-core: stable foundation for netplan.
//!
//! Contains:
//! - ids (compact graph ids, 1-based store ids, merge-time namespaced ids)
//! - numeric (Real + budget/weight guards)
//! - error (shared error taxonomy)

pub mod error;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PlanError, PlanResult};
pub use ids::*;
pub use numeric::*;
