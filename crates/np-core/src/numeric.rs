use crate::PlanError;

/// Floating point type used throughout the pipeline.
pub type Real = f64;

/// Budget sentinel marking a synthetic/junction node with no demand of its own.
pub const SYNTHETIC_BUDGET: Real = Real::INFINITY;

/// True if a budget value marks a synthetic (infinite-budget) node.
pub fn is_synthetic_budget(budget: Real) -> bool {
    budget.is_infinite() && budget.is_sign_positive()
}

/// Validate a node budget: non-negative, not NaN. Infinite is allowed (it is
/// the synthetic sentinel).
pub fn ensure_budget(v: Real, what: &'static str) -> Result<Real, PlanError> {
    if v.is_nan() || v < 0.0 {
        return Err(PlanError::InvalidInput {
            what: format!("budget for {what} must be non-negative, got {v}"),
        });
    }
    Ok(v)
}

/// Validate an edge weight: finite and non-negative.
pub fn ensure_weight(v: Real, what: &'static str) -> Result<Real, PlanError> {
    if !v.is_finite() || v < 0.0 {
        return Err(PlanError::InvalidInput {
            what: format!("weight for {what} must be finite and non-negative, got {v}"),
        });
    }
    Ok(v)
}
