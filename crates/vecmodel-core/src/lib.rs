//! Scalar optimization model: variables, linear rows, an objective and the
//! solve lifecycle that makes solved values available.
//!
//! [`ScalarModel`] is the narrow per-element interface that higher layers
//! (such as the array facade) drive; [`Model`] is the in-memory
//! implementation and [`Solver`] is the seam for solving backends.

pub mod model;
pub mod scalar;
pub mod solver;
pub mod types;

pub use model::{Model, ModelError};
pub use scalar::ScalarModel;
pub use solver::Solver;
pub use types::{Bounds, Constraint, Objective, Sense, VarKind, Variable};
pub use vecmodel_solver::{Solution, SolverConfig, SolverError, SolverStatus};
