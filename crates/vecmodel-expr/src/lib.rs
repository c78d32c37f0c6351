//! Linear expressions and comparison senses shared by the vecmodel crates.

pub mod expr;
pub mod ids;

pub use expr::{ComparisonSense, ConstraintExpr, Expr, LinearExprError, linear_sum, weighted_sum};
pub use ids::{ConstraintId, VariableId};
