//! Per-element model interface.

use crate::model::ModelError;
use crate::types::{Sense, VarKind};
use vecmodel_expr::{ConstraintExpr, ConstraintId, Expr, VariableId};

/// The scalar operations a vectorized layer needs from a model.
///
/// Every call acts on exactly one variable or one constraint. Errors are
/// the model's own and callers are expected to pass them through.
pub trait ScalarModel {
    /// Allocate one variable. `None` bounds mean unbounded on that side.
    fn add_var(
        &mut self,
        kind: &VarKind,
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> Result<VariableId, ModelError>;

    /// Register one constraint.
    fn add_cons(&mut self, constraint: ConstraintExpr) -> Result<ConstraintId, ModelError>;

    /// Replace the objective.
    fn set_objective(&mut self, expr: Expr, sense: Sense) -> Result<(), ModelError>;

    /// Solved value of a variable.
    fn get_val(&self, var_id: VariableId) -> Result<f64, ModelError>;

    /// Attach a display name to a variable.
    fn set_variable_name(&mut self, var_id: VariableId, name: String) -> Result<(), ModelError>;

    fn contains_variable(&self, var_id: VariableId) -> bool;

    fn num_variables(&self) -> usize;

    fn num_constraints(&self) -> usize;
}

impl ScalarModel for crate::Model {
    fn add_var(
        &mut self,
        kind: &VarKind,
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> Result<VariableId, ModelError> {
        self.add_variable(kind, lower, upper)
    }

    fn add_cons(&mut self, constraint: ConstraintExpr) -> Result<ConstraintId, ModelError> {
        self.add_constraint(constraint)
    }

    fn set_objective(&mut self, expr: Expr, sense: Sense) -> Result<(), ModelError> {
        crate::Model::set_objective(self, expr, sense)
    }

    fn get_val(&self, var_id: VariableId) -> Result<f64, ModelError> {
        crate::Model::get_val(self, var_id)
    }

    fn set_variable_name(&mut self, var_id: VariableId, name: String) -> Result<(), ModelError> {
        crate::Model::set_variable_name(self, var_id, name)
    }

    fn contains_variable(&self, var_id: VariableId) -> bool {
        var_id.index() < crate::Model::num_variables(self)
    }

    fn num_variables(&self) -> usize {
        crate::Model::num_variables(self)
    }

    fn num_constraints(&self) -> usize {
        crate::Model::num_constraints(self)
    }
}
