//! Model error types.

use vecmodel_expr::ComparisonSense;
use vecmodel_expr::ids::{ConstraintId, VariableId};

/// Errors that can occur during model operations
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Invalid variable ID
    InvalidVariableId(VariableId),
    /// Invalid variable bounds
    InvalidVariableBounds { lower: f64, upper: f64 },
    /// Variable kind this model cannot represent
    UnsupportedVariableKind { tag: String },
    /// Invalid constraint ID
    InvalidConstraintId(ConstraintId),
    /// Constraint right-hand side is NaN
    InvalidRhs { rhs: f64 },
    /// Coefficient is NaN or infinite
    InvalidCoefficient { coefficient: f64 },
    /// Comparison that has no linear row form
    UnsupportedComparison { sense: ComparisonSense },
    /// Solved value requested while no solution is stored
    ValueUnavailable { var_id: VariableId },
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::InvalidVariableId(_) => "VARIABLE_INVALID_ID",
            ModelError::InvalidVariableBounds { .. } => "VARIABLE_INVALID_BOUNDS",
            ModelError::UnsupportedVariableKind { .. } => "VARIABLE_UNSUPPORTED_KIND",
            ModelError::InvalidConstraintId(_) => "CONSTRAINT_INVALID_ID",
            ModelError::InvalidRhs { .. } => "CONSTRAINT_INVALID_RHS",
            ModelError::InvalidCoefficient { .. } => "COEFFICIENT_INVALID",
            ModelError::UnsupportedComparison { .. } => "CONSTRAINT_UNSUPPORTED_SENSE",
            ModelError::ValueUnavailable { .. } => "SOLUTION_VALUE_UNAVAILABLE",
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InvalidVariableId(id) => write!(
                f,
                "[{}] Variable ID {} does not exist",
                self.code(),
                id.inner()
            ),
            ModelError::InvalidVariableBounds { lower, upper } => write!(
                f,
                "[{}] Variable bounds invalid: lower ({}) > upper ({})",
                self.code(),
                lower,
                upper
            ),
            ModelError::UnsupportedVariableKind { tag } => write!(
                f,
                "[{}] Variable type '{}' is not supported (expected C, B or I)",
                self.code(),
                tag
            ),
            ModelError::InvalidConstraintId(id) => write!(
                f,
                "[{}] Constraint ID {} does not exist",
                self.code(),
                id.inner()
            ),
            ModelError::InvalidRhs { rhs } => {
                write!(f, "[{}] Constraint right-hand side is {}", self.code(), rhs)
            }
            ModelError::InvalidCoefficient { coefficient } => write!(
                f,
                "[{}] Coefficient must be finite (got {})",
                self.code(),
                coefficient
            ),
            ModelError::UnsupportedComparison { sense } => write!(
                f,
                "[{}] '{}' constraints cannot be expressed as a linear row",
                self.code(),
                sense
            ),
            ModelError::ValueUnavailable { var_id } => write!(
                f,
                "[{}] No solution value for variable {}; solve the model first",
                self.code(),
                var_id
            ),
        }
    }
}

impl std::error::Error for ModelError {}
