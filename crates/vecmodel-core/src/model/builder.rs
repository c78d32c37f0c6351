//! Model builder methods for adding variables, constraints, and objectives.

use crate::types::{Bounds, Constraint, Objective, Sense, VarKind, Variable};
use vecmodel_expr::expr::{ComparisonSense, ConstraintExpr, Expr};
use vecmodel_expr::ids::{ConstraintId, VariableId};

use crate::model::Model;
use crate::model::error::ModelError;

impl Model {
    /// Add a variable of the given kind.
    ///
    /// Binary variables live in `[0, 1]`; explicit bounds only tighten that
    /// range. Other kinds default to unbounded on each side left as `None`.
    pub fn add_variable(
        &mut self,
        kind: &VarKind,
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> Result<VariableId, ModelError> {
        let variable = match kind {
            VarKind::Continuous => Variable::continuous(Bounds::from_options(lower, upper)),
            VarKind::Integer => Variable::integer(Bounds::from_options(lower, upper)),
            VarKind::Binary => Variable {
                bounds: Bounds::new(
                    lower.map_or(0.0, |lb| lb.max(0.0)),
                    upper.map_or(1.0, |ub| ub.min(1.0)),
                ),
                is_integer: true,
            },
            VarKind::Other(tag) => {
                tracing::warn!(
                    component = "model",
                    operation = "add_variable",
                    status = "error",
                    tag = %tag,
                    "Rejected unsupported variable type"
                );
                return Err(ModelError::UnsupportedVariableKind { tag: tag.clone() });
            }
        };
        self.push_variable(variable)
    }

    /// Add a fully specified variable.
    pub fn push_variable(&mut self, variable: Variable) -> Result<VariableId, ModelError> {
        if !variable.bounds.is_valid() {
            return Err(ModelError::InvalidVariableBounds {
                lower: variable.bounds.lower,
                upper: variable.bounds.upper,
            });
        }

        self.invalidate_solution();
        let id = VariableId::new(self.variables.len() as u32);
        self.variables.push(variable);
        tracing::trace!(
            component = "model",
            operation = "add_variable",
            status = "success",
            var_id = id.inner(),
            lower = variable.bounds.lower,
            upper = variable.bounds.upper,
            is_integer = variable.is_integer,
            "Added variable"
        );
        Ok(id)
    }

    /// Add a constraint from a comparison expression (e.g., `x + y <= 10`).
    pub fn add_constraint(
        &mut self,
        constraint: ConstraintExpr,
    ) -> Result<ConstraintId, ModelError> {
        let (expr, sense, rhs) = constraint.into_parts();
        if rhs.is_nan() {
            return Err(ModelError::InvalidRhs { rhs });
        }
        let bounds = match sense {
            ComparisonSense::LessEqual => Bounds::new(f64::NEG_INFINITY, rhs),
            ComparisonSense::GreaterEqual => Bounds::new(rhs, f64::INFINITY),
            ComparisonSense::Equal => Bounds::new(rhs, rhs),
            ComparisonSense::NotEqual => {
                tracing::warn!(
                    component = "model",
                    operation = "add_constraint",
                    status = "error",
                    sense = sense.as_str(),
                    "Rejected non-linear comparison"
                );
                return Err(ModelError::UnsupportedComparison { sense });
            }
        };
        self.add_row(expr, bounds)
    }

    /// Add a constraint from an expression and explicit bounds.
    ///
    /// The expression's constant is moved into the bounds.
    pub fn add_row(&mut self, expr: Expr, bounds: Bounds) -> Result<ConstraintId, ModelError> {
        let bounds = Bounds::new(
            bounds.lower - expr.constant(),
            bounds.upper - expr.constant(),
        );
        if let Some(rhs) = bounds.invalid_side() {
            tracing::warn!(
                component = "model",
                operation = "add_constraint",
                status = "error",
                rhs,
                "Rejected constraint bounds"
            );
            return Err(ModelError::InvalidRhs { rhs });
        }
        let terms = self.lower_terms(expr)?;

        self.invalidate_solution();
        let id = ConstraintId::new(self.constraints.len() as u32);
        tracing::trace!(
            component = "model",
            operation = "add_constraint",
            status = "success",
            constraint_id = id.inner(),
            lower = bounds.lower,
            upper = bounds.upper,
            num_terms = terms.len(),
            "Added constraint"
        );
        self.constraints.push(Constraint { bounds, terms });
        Ok(id)
    }

    /// Replace the objective function.
    pub fn set_objective(&mut self, expr: Expr, sense: Sense) -> Result<(), ModelError> {
        let constant = expr.constant();
        if !constant.is_finite() {
            return Err(ModelError::InvalidCoefficient {
                coefficient: constant,
            });
        }
        let terms = self.lower_terms(expr)?;

        self.invalidate_solution();
        self.objective = Objective {
            sense: Some(sense),
            terms,
            constant,
        };
        tracing::debug!(
            component = "model",
            operation = "set_objective",
            status = "success",
            sense = sense.as_str(),
            terms = self.objective.terms.len(),
            "Set objective function"
        );
        Ok(())
    }

    /// Minimize a linear expression, replacing any previous objective.
    pub fn minimize(&mut self, expr: Expr) -> Result<(), ModelError> {
        self.set_objective(expr, Sense::Minimize)
    }

    /// Maximize a linear expression, replacing any previous objective.
    pub fn maximize(&mut self, expr: Expr) -> Result<(), ModelError> {
        self.set_objective(expr, Sense::Maximize)
    }
}
