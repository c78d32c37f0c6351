//! Objective inputs accepted by [`ArrayModel::set_objective`](crate::ArrayModel::set_objective).

use vecmodel_expr::{Expr, VariableId};

use crate::error::ArrayError;
use crate::expr_array::ExprArray;
use crate::token::{ModelToken, ensure_same};
use crate::var_array::VarArray;

/// A scalar expression, or an array holding exactly one element.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectiveInput {
    /// Checked for unknown ids only; see [`Operand::Expr`](crate::Operand::Expr).
    Expr(Expr),
    Array(ExprArray),
}

impl ObjectiveInput {
    /// The single objective expression.
    ///
    /// Arrays must have shape `()` or `(1,)`.
    pub(crate) fn into_expr(self, token: ModelToken) -> Result<Expr, ArrayError> {
        match self {
            ObjectiveInput::Expr(expr) => Ok(expr),
            ObjectiveInput::Array(array) => {
                ensure_same(token, array.token())?;
                match (array.shape(), array.iter().next()) {
                    ([] | [1], Some(expr)) => Ok(expr.clone()),
                    (shape, _) => Err(ArrayError::ObjectiveShape {
                        shape: shape.to_vec(),
                    }),
                }
            }
        }
    }
}

impl From<Expr> for ObjectiveInput {
    fn from(expr: Expr) -> Self {
        ObjectiveInput::Expr(expr)
    }
}

impl From<VariableId> for ObjectiveInput {
    fn from(var_id: VariableId) -> Self {
        ObjectiveInput::Expr(Expr::var(var_id))
    }
}

impl From<ExprArray> for ObjectiveInput {
    fn from(array: ExprArray) -> Self {
        ObjectiveInput::Array(array)
    }
}

impl From<&ExprArray> for ObjectiveInput {
    fn from(array: &ExprArray) -> Self {
        ObjectiveInput::Array(array.clone())
    }
}

impl From<VarArray> for ObjectiveInput {
    fn from(array: VarArray) -> Self {
        ObjectiveInput::Array(array.to_exprs())
    }
}

impl From<&VarArray> for ObjectiveInput {
    fn from(array: &VarArray) -> Self {
        ObjectiveInput::Array(array.to_exprs())
    }
}
