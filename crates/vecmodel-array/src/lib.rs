//! Vectorized modeling on top of a scalar optimization model.
//!
//! [`ArrayModel`] allocates whole arrays of variables at once and turns
//! broadcast comparisons into batches of scalar constraints:
//!
//! - [`VarArray`]: an `ndarray` of variable ids bound to one model
//! - [`ExprArray`]: linear expressions built from variable arrays
//! - [`Comparison`]: a deferred `lhs <sense> rhs` descriptor
//! - [`ArrayModel`]: the facade that registers all of the above
//!
//! Solving is delegated to a [`vecmodel_core::Solver`] backend; solved
//! values come back through [`VarArray::value`] as plain numeric arrays.

pub mod comparison;
pub mod error;
pub mod expr_array;
pub mod logging;
pub mod model;
pub mod objective;
pub mod shape;
pub mod token;
pub mod var_array;

pub use comparison::{Comparison, Operand};
pub use error::ArrayError;
pub use expr_array::ExprArray;
pub use logging::{LoggingError, init_logging};
pub use model::ArrayModel;
pub use objective::ObjectiveInput;
pub use token::ModelToken;
pub use var_array::VarArray;

pub use vecmodel_core::{Model, Sense, SolverConfig, SolverStatus, VarKind};
pub use vecmodel_expr::{ComparisonSense, ConstraintId, Expr, VariableId};
