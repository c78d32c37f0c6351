//! Array layer error types.

use crate::shape::fmt_shape;
use vecmodel_core::ModelError;
use vecmodel_expr::LinearExprError;

/// Errors raised by array construction, arithmetic and the model facade.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayError {
    /// A flat element list does not fill the requested shape.
    Shape { reason: String },
    /// A comparison or arithmetic operand cannot be broadcast.
    Broadcast { lhs: Vec<usize>, rhs: Vec<usize> },
    /// Matrix product operands have incompatible shapes.
    MatmulShape { lhs: Vec<usize>, rhs: Vec<usize> },
    /// Axis index is not below the array's dimensionality.
    AxisOutOfRange { axis: usize, ndim: usize },
    /// Position along an axis is past its length.
    IndexOutOfRange { axis: usize, index: usize, len: usize },
    /// An objective array holds more than one element.
    ObjectiveShape { shape: Vec<usize> },
    /// The array was created by a different model.
    ForeignModel,
    /// Expression construction failed.
    Expr(LinearExprError),
    /// Error from the underlying model, unchanged.
    Model(ModelError),
}

impl ArrayError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ArrayError::Shape { .. } => "ARRAY_SHAPE",
            ArrayError::Broadcast { .. } => "ARRAY_BROADCAST",
            ArrayError::MatmulShape { .. } => "ARRAY_MATMUL_SHAPE",
            ArrayError::AxisOutOfRange { .. } => "ARRAY_AXIS_OUT_OF_RANGE",
            ArrayError::IndexOutOfRange { .. } => "ARRAY_INDEX_OUT_OF_RANGE",
            ArrayError::ObjectiveShape { .. } => "OBJECTIVE_SHAPE",
            ArrayError::ForeignModel => "ARRAY_FOREIGN_MODEL",
            ArrayError::Expr(err) => err.code(),
            ArrayError::Model(err) => err.code(),
        }
    }
}

impl std::fmt::Display for ArrayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArrayError::Shape { reason } => {
                write!(f, "[{}] Cannot build array: {}", self.code(), reason)
            }
            ArrayError::Broadcast { lhs, rhs } => write!(
                f,
                "[{}] constraints could not be broadcast together with shapes {} {}",
                self.code(),
                fmt_shape(lhs),
                fmt_shape(rhs)
            ),
            ArrayError::MatmulShape { lhs, rhs } => write!(
                f,
                "[{}] matrix product shapes {} and {} are not aligned",
                self.code(),
                fmt_shape(lhs),
                fmt_shape(rhs)
            ),
            ArrayError::AxisOutOfRange { axis, ndim } => write!(
                f,
                "[{}] axis {} is out of bounds for array of dimension {}",
                self.code(),
                axis,
                ndim
            ),
            ArrayError::IndexOutOfRange { axis, index, len } => write!(
                f,
                "[{}] index {} is out of bounds for axis {} with size {}",
                self.code(),
                index,
                axis,
                len
            ),
            ArrayError::ObjectiveShape { shape } => write!(
                f,
                "[{}] given coefficients shape are neither () or (1,) but {}",
                self.code(),
                fmt_shape(shape)
            ),
            ArrayError::ForeignModel => write!(
                f,
                "[{}] array belongs to a different model",
                self.code()
            ),
            ArrayError::Expr(err) => std::fmt::Display::fmt(err, f),
            ArrayError::Model(err) => std::fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for ArrayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArrayError::Expr(err) => Some(err),
            ArrayError::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelError> for ArrayError {
    fn from(err: ModelError) -> Self {
        ArrayError::Model(err)
    }
}

impl From<LinearExprError> for ArrayError {
    fn from(err: LinearExprError) -> Self {
        ArrayError::Expr(err)
    }
}

impl From<ndarray::ShapeError> for ArrayError {
    fn from(err: ndarray::ShapeError) -> Self {
        ArrayError::Shape {
            reason: err.to_string(),
        }
    }
}
