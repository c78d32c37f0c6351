//! Model module for building optimization models.
//!
//! - [`error`]: Model error types
//! - `builder`: Methods for adding variables, constraints, and objectives
//! - `storage`: Read access to variables and rows
//! - `metadata`: Variable naming
//! - `solve`: Solve lifecycle and solved-value lookup

mod builder;
mod error;
mod metadata;
mod solve;
mod storage;

use crate::types::{Constraint, Objective, Variable};
use std::time::Instant;
use vecmodel_expr::Expr;
use vecmodel_expr::ids::VariableId;
use vecmodel_solver::Solution;

pub use error::ModelError;

/// An in-memory linear / mixed-integer model.
///
/// Variables and rows are append-only and addressed by dense ids. A solution
/// is stored by [`Model::optimize`] and dropped again by any mutation, so
/// solved values always describe the model as it currently stands.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub(crate) variables: Vec<Variable>,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) objective: Objective,
    pub(crate) solution: Option<Solution>,
    pub(crate) variable_names: metadata::VariableNames,
}

impl Model {
    /// Create a new empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the objective
    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub(crate) fn ensure_variable_exists(&self, id: VariableId) -> Result<(), ModelError> {
        if id.index() < self.variables.len() {
            Ok(())
        } else {
            Err(ModelError::InvalidVariableId(id))
        }
    }

    /// Validate and merge the linear terms of an expression.
    pub(crate) fn lower_terms(&self, expr: Expr) -> Result<Vec<(VariableId, f64)>, ModelError> {
        let started = Instant::now();
        let terms_in = expr.linear_terms().len();
        for (var_id, coeff) in expr.linear_terms() {
            self.ensure_variable_exists(*var_id)?;
            if !coeff.is_finite() {
                return Err(ModelError::InvalidCoefficient {
                    coefficient: *coeff,
                });
            }
        }
        let normalized = expr.normalized_terms();

        tracing::trace!(
            component = "model",
            operation = "lower_expr",
            status = "success",
            expr_terms_in = terms_in,
            expr_terms_out = normalized.len(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Lowered linear expression"
        );
        Ok(normalized)
    }

    pub(crate) fn invalidate_solution(&mut self) {
        if self.solution.take().is_some() {
            tracing::debug!(
                component = "model",
                operation = "invalidate_solution",
                status = "success",
                "Model changed after solve; dropped stored solution"
            );
        }
    }
}
