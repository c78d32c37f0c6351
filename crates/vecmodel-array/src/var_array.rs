//! Array-backed variable handles.

use ndarray::{Array, Array1, Array2, ArrayD, Axis, Dimension};
use vecmodel_core::ScalarModel;
use vecmodel_expr::{ComparisonSense, Expr, VariableId};

use crate::comparison::{Comparison, Operand};
use crate::error::ArrayError;
use crate::expr_array::ExprArray;
use crate::model::ArrayModel;
use crate::shape::check_index;
use crate::token::ModelToken;

/// An n-dimensional array of variables, tied to the model that owns them.
///
/// Comparisons produce [`Comparison`] descriptors rather than booleans;
/// arithmetic produces [`ExprArray`]s. Solved values are read back with
/// [`VarArray::value`], which returns a plain numeric array.
#[derive(Debug, Clone, PartialEq)]
pub struct VarArray {
    token: ModelToken,
    vars: ArrayD<VariableId>,
}

impl VarArray {
    pub(crate) fn new(token: ModelToken, vars: ArrayD<VariableId>) -> Self {
        Self { token, vars }
    }

    /// Tie this handle to `model`.
    ///
    /// Later readback and constraint registration go through that model.
    pub fn bind<M: ScalarModel>(&mut self, model: &ArrayModel<M>) {
        self.token = model.token();
    }

    pub fn token(&self) -> ModelToken {
        self.token
    }

    pub fn shape(&self) -> &[usize] {
        self.vars.shape()
    }

    pub fn ndim(&self) -> usize {
        self.vars.ndim()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Variable at a full multi-index, e.g. `&[1, 0]`.
    pub fn get(&self, index: &[usize]) -> Option<VariableId> {
        self.vars.get(index).copied()
    }

    /// Iterate variables in row-major order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = VariableId> + '_ {
        self.vars.iter().copied()
    }

    pub fn as_array(&self) -> &ArrayD<VariableId> {
        &self.vars
    }

    pub fn into_array(self) -> ArrayD<VariableId> {
        self.vars
    }

    /// Sub-array at `index` along `axis`, with that axis removed.
    pub fn index_axis(&self, axis: usize, index: usize) -> Result<VarArray, ArrayError> {
        check_index(self.shape(), axis, index)?;
        Ok(VarArray::new(
            self.token,
            self.vars.index_axis(Axis(axis), index).to_owned(),
        ))
    }

    /// Each variable as a one-term expression.
    pub fn to_exprs(&self) -> ExprArray {
        ExprArray::new(self.token, self.vars.map(|var_id| Expr::var(*var_id)))
    }

    // ── Comparisons (deferred) ──────────────────────────────

    /// Describe `self <sense> rhs` without touching the model.
    pub fn compare(&self, rhs: impl Into<Operand>, sense: ComparisonSense) -> Comparison {
        Comparison::new(self.to_exprs(), rhs.into(), sense)
    }

    pub fn le(&self, rhs: impl Into<Operand>) -> Comparison {
        self.compare(rhs, ComparisonSense::LessEqual)
    }

    pub fn ge(&self, rhs: impl Into<Operand>) -> Comparison {
        self.compare(rhs, ComparisonSense::GreaterEqual)
    }

    pub fn equal(&self, rhs: impl Into<Operand>) -> Comparison {
        self.compare(rhs, ComparisonSense::Equal)
    }

    pub fn not_equal(&self, rhs: impl Into<Operand>) -> Comparison {
        self.compare(rhs, ComparisonSense::NotEqual)
    }

    // ── Arithmetic, see `ExprArray` ─────────────────────────

    pub fn add(&self, rhs: impl Into<Operand>) -> Result<ExprArray, ArrayError> {
        self.to_exprs().add(rhs)
    }

    pub fn sub(&self, rhs: impl Into<Operand>) -> Result<ExprArray, ArrayError> {
        self.to_exprs().sub(rhs)
    }

    pub fn scale(&self, factor: f64) -> ExprArray {
        self.to_exprs().scale(factor)
    }

    pub fn mul_elementwise<D: Dimension>(
        &self,
        weights: &Array<f64, D>,
    ) -> Result<ExprArray, ArrayError> {
        self.to_exprs().mul_elementwise(weights)
    }

    pub fn sum(&self) -> ExprArray {
        self.to_exprs().sum()
    }

    pub fn sum_axis(&self, axis: usize) -> Result<ExprArray, ArrayError> {
        self.to_exprs().sum_axis(axis)
    }

    pub fn dot(&self, weights: &Array1<f64>) -> Result<ExprArray, ArrayError> {
        self.to_exprs().dot(weights)
    }

    pub fn matmul(&self, rhs: &Array2<f64>) -> Result<ExprArray, ArrayError> {
        self.to_exprs().matmul(rhs)
    }

    pub fn rmatmul(&self, lhs: &Array2<f64>) -> Result<ExprArray, ArrayError> {
        self.to_exprs().rmatmul(lhs)
    }

    // ── Readback ────────────────────────────────────────────

    /// Solved value of every variable, in the same shape.
    ///
    /// Can be called any number of times; each call reads the model's
    /// current solution. Fails with [`ArrayError::ForeignModel`] when the
    /// handle belongs to another model, and with the model's own lookup
    /// error when no solution is available.
    pub fn value<M: ScalarModel>(&self, model: &ArrayModel<M>) -> Result<ArrayD<f64>, ArrayError> {
        model.ensure_owns(self.token)?;
        let inner = model.inner();
        let values = self
            .vars
            .iter()
            .map(|var_id| inner.get_val(*var_id))
            .collect::<Result<Vec<f64>, _>>()?;
        tracing::trace!(
            component = "array",
            operation = "value",
            status = "success",
            elements = values.len(),
            "Read solved values"
        );
        Ok(ArrayD::from_shape_vec(self.vars.raw_dim(), values)?)
    }
}

impl std::ops::Mul<f64> for &VarArray {
    type Output = ExprArray;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl std::ops::Neg for &VarArray {
    type Output = ExprArray;

    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}
