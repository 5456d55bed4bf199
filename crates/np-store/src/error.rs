//! Store-specific error types.

use np_core::PlanError;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Node id {id} already exists in the store")]
    DuplicateNode { id: u32 },

    #[error("Invalid store path: {message}")]
    InvalidPath { message: String },

    #[error("No store found at {path}")]
    NotFound { path: String },
}

impl From<StoreError> for PlanError {
    fn from(err: StoreError) -> Self {
        PlanError::StoreWrite {
            what: err.to_string(),
        }
    }
}
