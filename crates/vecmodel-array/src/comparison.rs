//! Deferred comparison descriptors.
//!
//! A [`Comparison`] records both operands and the sense. It becomes scalar
//! constraints only when passed to [`ArrayModel::add_cons`](crate::ArrayModel::add_cons).

use ndarray::{Array, ArrayD, Dimension};
use vecmodel_expr::{ComparisonSense, ConstraintExpr, Expr, VariableId};

use crate::error::ArrayError;
use crate::expr_array::ExprArray;
use crate::shape::broadcast_to;
use crate::token::{ModelToken, ensure_same};
use crate::var_array::VarArray;

/// Right-hand side of a comparison or arithmetic operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Scalar(f64),
    /// A single expression, broadcast like a scalar.
    ///
    /// It carries no model token. [`ArrayModel`](crate::ArrayModel) rejects
    /// ids the model does not have, but cannot tell a foreign id from one of
    /// its own at the same index.
    Expr(Expr),
    Values(ArrayD<f64>),
    Exprs(ExprArray),
}

impl Operand {
    /// Shape of the operand; scalars and single expressions are 0-d.
    pub fn shape(&self) -> &[usize] {
        match self {
            Operand::Scalar(_) | Operand::Expr(_) => &[],
            Operand::Values(values) => values.shape(),
            Operand::Exprs(exprs) => exprs.shape(),
        }
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl From<Expr> for Operand {
    fn from(expr: Expr) -> Self {
        Operand::Expr(expr)
    }
}

impl From<VariableId> for Operand {
    fn from(var_id: VariableId) -> Self {
        Operand::Expr(Expr::var(var_id))
    }
}

impl<D: Dimension> From<Array<f64, D>> for Operand {
    fn from(values: Array<f64, D>) -> Self {
        Operand::Values(values.into_dyn())
    }
}

impl From<ExprArray> for Operand {
    fn from(exprs: ExprArray) -> Self {
        Operand::Exprs(exprs)
    }
}

impl From<&ExprArray> for Operand {
    fn from(exprs: &ExprArray) -> Self {
        Operand::Exprs(exprs.clone())
    }
}

impl From<VarArray> for Operand {
    fn from(vars: VarArray) -> Self {
        Operand::Exprs(vars.to_exprs())
    }
}

impl From<&VarArray> for Operand {
    fn from(vars: &VarArray) -> Self {
        Operand::Exprs(vars.to_exprs())
    }
}

/// `lhs <sense> rhs`, not yet registered with any model.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "a comparison adds nothing until passed to `ArrayModel::add_cons`"]
pub struct Comparison {
    lhs: ExprArray,
    rhs: Operand,
    sense: ComparisonSense,
}

impl Comparison {
    pub fn new(lhs: ExprArray, rhs: Operand, sense: ComparisonSense) -> Self {
        Self { lhs, rhs, sense }
    }

    pub fn lhs(&self) -> &ExprArray {
        &self.lhs
    }

    pub fn rhs(&self) -> &Operand {
        &self.rhs
    }

    pub fn sense(&self) -> ComparisonSense {
        self.sense
    }

    /// Number of scalar constraints this comparison expands to.
    pub fn len(&self) -> usize {
        self.lhs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lhs.is_empty()
    }

    /// Expand into one scalar constraint per element of `lhs`, in row-major
    /// order. The right side is broadcast to the left shape.
    pub(crate) fn lower(&self, token: ModelToken) -> Result<Vec<ConstraintExpr>, ArrayError> {
        ensure_same(token, self.lhs.token())?;
        let sense = self.sense;
        let lhs = self.lhs.as_array();
        let rows = match &self.rhs {
            Operand::Scalar(value) => lhs
                .iter()
                .map(|expr| expr.compare_scalar(*value, sense))
                .collect(),
            Operand::Expr(other) => lhs
                .iter()
                .map(|expr| expr.compare_expr(other, sense))
                .collect(),
            Operand::Values(values) => {
                let values = broadcast_to(values, lhs.shape())?;
                lhs.iter()
                    .zip(values.iter())
                    .map(|(expr, value)| expr.compare_scalar(*value, sense))
                    .collect()
            }
            Operand::Exprs(other) => {
                ensure_same(token, other.token())?;
                let others = broadcast_to(other.as_array(), lhs.shape())?;
                lhs.iter()
                    .zip(others.iter())
                    .map(|(expr, other)| expr.compare_expr(other, sense))
                    .collect()
            }
        };
        Ok(rows)
    }
}
