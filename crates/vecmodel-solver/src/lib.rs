//! Solver-agnostic types shared by vecmodel backends.
//!
//! # Overview
//!
//! - [`SolverConfig`]: Configuration options for solver behavior
//! - [`SolverStatus`]: Common status values across solvers
//! - [`SolverError`]: Error types for solver operations
//! - [`Solution`]: Primal values and objective returned by a backend

mod config;
mod error;
mod solution;
mod status;

pub use config::{MIN_TOLERANCE, SolverConfig};
pub use error::SolverError;
pub use solution::Solution;
pub use status::SolverStatus;
