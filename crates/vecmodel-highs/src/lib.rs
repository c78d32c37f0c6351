//! HiGHS backend for vecmodel.
//!
//! [`HighsSolver`] implements [`vecmodel_core::Solver`] by translating a
//! [`vecmodel_core::Model`] into a HiGHS row problem and reading back primal
//! values, row activities and the objective.

pub mod problem;
pub mod solver;
mod status;

pub use problem::{HighsOption, HighsProblem, HighsProblemError, SolvedProblem, options_from_config};
pub use solver::HighsSolver;
