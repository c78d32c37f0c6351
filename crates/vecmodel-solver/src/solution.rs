//! Solver-agnostic solution returned by a backend.

use crate::SolverStatus;

/// Result of a successful solve.
///
/// Values are indexed by the position of the variable (or constraint) in the
/// model that was solved.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Primal values of variables.
    pub primal_values: Vec<f64>,
    /// Row activity values (constraint LHS evaluated at the solution).
    pub row_values: Vec<f64>,
    /// Objective value of the solution.
    pub objective_value: f64,
    /// Status reported by the backend.
    pub status: SolverStatus,
    /// Solve time in seconds.
    pub solve_time_seconds: f64,
}

impl Solution {
    /// Get the primal value at the given index.
    pub fn get_primal(&self, index: usize) -> Option<f64> {
        self.primal_values.get(index).copied()
    }

    /// Get the row activity at the given index.
    pub fn get_row_value(&self, index: usize) -> Option<f64> {
        self.row_values.get(index).copied()
    }
}
