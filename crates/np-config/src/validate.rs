//! Configuration validation logic.

use np_core::PlanError;

use crate::schema::PlanConfig;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Missing value: {field}")]
    MissingValue { field: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Cannot read config {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Malformed config {path}: {reason}")]
    Malformed { path: String, reason: String },
}

impl From<ValidationError> for PlanError {
    fn from(err: ValidationError) -> Self {
        PlanError::Configuration {
            what: err.to_string(),
        }
    }
}

pub fn validate_config(config: &PlanConfig) -> Result<(), ValidationError> {
    if config.network_algorithm.trim().is_empty() {
        return Err(ValidationError::MissingValue {
            field: "network_algorithm".to_string(),
        });
    }

    if config.network_parameters.minimum_node_count < 1 {
        return Err(ValidationError::InvalidValue {
            field: "network_parameters.minimum_node_count".to_string(),
            value: config.network_parameters.minimum_node_count.to_string(),
            reason: "must be >= 1".to_string(),
        });
    }

    if config.demand_nodes_file.as_os_str().is_empty() {
        return Err(ValidationError::MissingValue {
            field: "demand_nodes_file".to_string(),
        });
    }

    if let Some(existing) = &config.existing_networks {
        if existing.filename.as_os_str().is_empty() {
            return Err(ValidationError::MissingValue {
                field: "existing_networks.filename".to_string(),
            });
        }
        if let Some(budget) = existing.budget_value {
            if budget.is_nan() || budget < 0.0 {
                return Err(ValidationError::InvalidValue {
                    field: "existing_networks.budget_value".to_string(),
                    value: budget.to_string(),
                    reason: "must be non-negative".to_string(),
                });
            }
        }
    }

    Ok(())
}
