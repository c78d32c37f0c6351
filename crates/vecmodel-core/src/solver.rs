//! Backend trait for solving a [`Model`].

use crate::Model;
use vecmodel_solver::{Solution, SolverConfig, SolverError};

/// Trait that all solver backends must implement.
pub trait Solver {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    /// Solve the given model and return a solver-agnostic solution.
    ///
    /// `Solution::objective_value` excludes the objective's constant
    /// offset; [`Model::objective_value`] adds it back.
    fn solve(&mut self, model: &Model, config: &SolverConfig) -> Result<Solution, SolverError>;
}
