use thiserror::Error;

pub type PlanResult<T> = Result<T, PlanError>;

/// Shared error taxonomy for the planning pipeline.
///
/// Every variant is unrecoverable at the point of detection: the pipeline runs
/// once per invocation over a fixed input snapshot and aborts on the first
/// failure. Messages name the failing stage and the violated invariant.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    #[error("Projection mismatch: {left} vs {right}")]
    ProjectionMismatch { left: String, right: String },

    #[error("Configuration error: {what}")]
    Configuration { what: String },

    #[error("Structural integrity violated: {what}")]
    StructuralIntegrity { what: String },

    #[error("Store write failed: {what}")]
    StoreWrite { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlanError {
    pub fn invalid_input(what: impl Into<String>) -> Self {
        PlanError::InvalidInput { what: what.into() }
    }

    pub fn configuration(what: impl Into<String>) -> Self {
        PlanError::Configuration { what: what.into() }
    }

    pub fn structural(what: impl Into<String>) -> Self {
        PlanError::StructuralIntegrity { what: what.into() }
    }
}
