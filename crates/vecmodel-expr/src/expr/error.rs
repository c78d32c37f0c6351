//! Expression construction errors.

#[derive(Debug, Clone, PartialEq)]
pub enum LinearExprError {
    /// Number of expressions and weights differ.
    MismatchedLengths { exprs: usize, weights: usize },
    /// A weight was NaN or infinite.
    NonFiniteWeight { weight: f64 },
}

impl LinearExprError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            LinearExprError::MismatchedLengths { .. } => "EXPR_MISMATCHED_LENGTHS",
            LinearExprError::NonFiniteWeight { .. } => "EXPR_NON_FINITE_WEIGHT",
        }
    }
}

impl std::fmt::Display for LinearExprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinearExprError::MismatchedLengths { exprs, weights } => write!(
                f,
                "[{}] expressions and weights must have the same length ({} vs {})",
                self.code(),
                exprs,
                weights
            ),
            LinearExprError::NonFiniteWeight { weight } => {
                write!(f, "[{}] weight must be finite (got {})", self.code(), weight)
            }
        }
    }
}

impl std::error::Error for LinearExprError {}
