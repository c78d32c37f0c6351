use crate::model::Model;
use crate::solver::Solver;
use vecmodel_solver::{Solution, SolverConfig, SolverError, SolverStatus};

/// Backend that hands back a prepared primal vector.
pub(super) struct FixedSolver {
    pub status: SolverStatus,
    pub primal: Vec<f64>,
    pub calls: usize,
}

impl FixedSolver {
    pub(super) fn optimal(primal: Vec<f64>) -> Self {
        Self {
            status: SolverStatus::Optimal,
            primal,
            calls: 0,
        }
    }

    pub(super) fn infeasible() -> Self {
        Self {
            status: SolverStatus::Infeasible,
            primal: Vec::new(),
            calls: 0,
        }
    }
}

impl Solver for FixedSolver {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn solve(&mut self, model: &Model, _config: &SolverConfig) -> Result<Solution, SolverError> {
        self.calls += 1;
        let value_of = |terms: &[(vecmodel_expr::VariableId, f64)]| -> f64 {
            terms
                .iter()
                .map(|(var, coeff)| coeff * self.primal.get(var.index()).copied().unwrap_or(0.0))
                .sum()
        };
        let objective_value = value_of(&model.objective().terms);
        let row_values = model
            .constraints()
            .map(|(_, constraint)| value_of(&constraint.terms))
            .collect();
        Ok(Solution {
            primal_values: self.primal.clone(),
            row_values,
            objective_value,
            status: self.status,
            solve_time_seconds: 0.0,
        })
    }
}
