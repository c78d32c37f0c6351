//! Solve lifecycle and solved-value lookup.

use std::time::Instant;

use vecmodel_expr::ids::{ConstraintId, VariableId};
use vecmodel_solver::{Solution, SolverConfig, SolverError, SolverStatus};

use crate::model::Model;
use crate::model::error::ModelError;
use crate::solver::Solver;

impl Model {
    /// Solve the model with `solver` and store the result.
    ///
    /// The solution is kept only when the backend reports one; otherwise the
    /// status is returned and [`Model::get_val`] keeps failing.
    pub fn optimize(
        &mut self,
        solver: &mut dyn Solver,
        config: &SolverConfig,
    ) -> Result<SolverStatus, SolverError> {
        config.validate()?;
        if self.variables.is_empty() {
            return Err(SolverError::EmptyModel);
        }

        self.invalidate_solution();
        let started = Instant::now();
        tracing::debug!(
            component = "model",
            operation = "optimize",
            status = "start",
            backend = solver.name(),
            num_variables = self.variables.len(),
            num_constraints = self.constraints.len(),
            "Solving model"
        );

        let solution = solver.solve(self, config)?;
        let status = solution.status;
        tracing::debug!(
            component = "model",
            operation = "optimize",
            status = "success",
            backend = solver.name(),
            solver_status = status.as_str(),
            objective = solution.objective_value,
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Solve finished"
        );

        if status.has_solution() && solution.primal_values.len() == self.variables.len() {
            self.solution = Some(solution);
        }
        Ok(status)
    }

    /// Whether a solution is currently stored.
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// The stored solution, if the model was solved and not changed since.
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Solved value of one variable.
    pub fn get_val(&self, var_id: VariableId) -> Result<f64, ModelError> {
        self.ensure_variable_exists(var_id)?;
        self.solution
            .as_ref()
            .and_then(|solution| solution.get_primal(var_id.index()))
            .ok_or(ModelError::ValueUnavailable { var_id })
    }

    /// Row activity (left-hand side value) of one constraint in the stored
    /// solution. The constraint's own constant is already in its bounds.
    pub fn get_activity(&self, constraint_id: ConstraintId) -> Option<f64> {
        self.solution
            .as_ref()
            .and_then(|solution| solution.get_row_value(constraint_id.index()))
    }

    /// Objective value of the stored solution, including the constant offset.
    pub fn objective_value(&self) -> Option<f64> {
        self.solution
            .as_ref()
            .map(|solution| solution.objective_value + self.objective.constant)
    }
}
