//! Arrays of linear expressions built from [`VarArray`](crate::VarArray)s.
//!
//! Element-wise operations follow numpy broadcasting. Reductions and
//! products with numeric matrices produce new arrays; nothing here touches
//! the model until the result is compared and registered, or used as an
//! objective.

use std::time::Instant;

use ndarray::{Array, Array1, Array2, ArrayD, Axis, Dimension, IxDyn};
use vecmodel_core::{ModelError, ScalarModel};
use vecmodel_expr::{ComparisonSense, Expr, linear_sum, weighted_sum};

use crate::comparison::{Comparison, Operand};
use crate::error::ArrayError;
use crate::model::ArrayModel;
use crate::shape::{check_axis, check_index, zip_broadcast};
use crate::token::{ModelToken, ensure_same};

/// An n-dimensional array of linear expressions owned by one model.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprArray {
    token: ModelToken,
    exprs: ArrayD<Expr>,
}

impl ExprArray {
    pub(crate) fn new(token: ModelToken, exprs: ArrayD<Expr>) -> Self {
        Self { token, exprs }
    }

    fn with_exprs(&self, exprs: ArrayD<Expr>) -> Self {
        Self::new(self.token, exprs)
    }

    pub fn token(&self) -> ModelToken {
        self.token
    }

    pub fn shape(&self) -> &[usize] {
        self.exprs.shape()
    }

    pub fn ndim(&self) -> usize {
        self.exprs.ndim()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    /// Element at a full multi-index, e.g. `&[1, 0]`.
    pub fn get(&self, index: &[usize]) -> Option<&Expr> {
        self.exprs.get(index)
    }

    /// Iterate elements in row-major order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Expr> + '_ {
        self.exprs.iter()
    }

    pub fn as_array(&self) -> &ArrayD<Expr> {
        &self.exprs
    }

    pub fn into_array(self) -> ArrayD<Expr> {
        self.exprs
    }

    /// Sub-array at `index` along `axis`, with that axis removed.
    pub fn index_axis(&self, axis: usize, index: usize) -> Result<ExprArray, ArrayError> {
        check_index(self.shape(), axis, index)?;
        Ok(self.with_exprs(self.exprs.index_axis(Axis(axis), index).to_owned()))
    }

    // ── Element-wise arithmetic ─────────────────────────────

    /// `self + rhs`, broadcasting both sides.
    pub fn add(&self, rhs: impl Into<Operand>) -> Result<ExprArray, ArrayError> {
        self.combine(rhs.into(), 1.0)
    }

    /// `self - rhs`, broadcasting both sides.
    pub fn sub(&self, rhs: impl Into<Operand>) -> Result<ExprArray, ArrayError> {
        self.combine(rhs.into(), -1.0)
    }

    fn combine(&self, rhs: Operand, sign: f64) -> Result<ExprArray, ArrayError> {
        let exprs = match rhs {
            Operand::Scalar(value) => self.exprs.map(|expr| expr.add_constant(sign * value)),
            Operand::Expr(other) => {
                let other = other.scale(sign);
                self.exprs.map(|expr| expr.add(&other))
            }
            Operand::Values(values) => {
                zip_broadcast(&self.exprs, &values, |expr, value| {
                    expr.add_constant(sign * value)
                })?
            }
            Operand::Exprs(other) => {
                ensure_same(self.token, other.token)?;
                zip_broadcast(&self.exprs, &other.exprs, |left, right| {
                    left.add(&right.scale(sign))
                })?
            }
        };
        Ok(self.with_exprs(exprs))
    }

    /// Multiply every element by `factor`.
    pub fn scale(&self, factor: f64) -> ExprArray {
        self.with_exprs(self.exprs.map(|expr| expr.scale(factor)))
    }

    /// Element-wise product with a numeric array, broadcasting both sides.
    pub fn mul_elementwise<D: Dimension>(
        &self,
        weights: &Array<f64, D>,
    ) -> Result<ExprArray, ArrayError> {
        let weights = weights.view().into_dyn().to_owned();
        let exprs = zip_broadcast(&self.exprs, &weights, |expr, weight| expr.scale(*weight))?;
        Ok(self.with_exprs(exprs))
    }

    // ── Reductions and products ─────────────────────────────

    /// Sum of all elements as a 0-d array.
    pub fn sum(&self) -> ExprArray {
        let total = linear_sum(self.exprs.iter());
        self.with_exprs(ArrayD::from_elem(IxDyn(&[]), total))
    }

    /// Sum along `axis`, removing it from the shape.
    pub fn sum_axis(&self, axis: usize) -> Result<ExprArray, ArrayError> {
        check_axis(self.shape(), axis)?;
        let started = Instant::now();
        let exprs = self
            .exprs
            .fold_axis(Axis(axis), Expr::new_empty(), |acc, expr| acc.add(expr));
        tracing::trace!(
            component = "array",
            operation = "sum_axis",
            status = "success",
            axis,
            elements_in = self.len(),
            elements_out = exprs.len(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Summed expression array along axis"
        );
        Ok(self.with_exprs(exprs))
    }

    /// Contract the last axis with `weights`.
    ///
    /// A 1-d array yields a 0-d result; in general the last axis is removed.
    pub fn dot(&self, weights: &Array1<f64>) -> Result<ExprArray, ArrayError> {
        let ndim = self.ndim();
        if ndim == 0 || self.shape()[ndim - 1] != weights.len() {
            return Err(ArrayError::MatmulShape {
                lhs: self.shape().to_vec(),
                rhs: vec![weights.len()],
            });
        }
        let weights = weights.to_vec();
        let mut out = Vec::with_capacity(self.len() / weights.len().max(1));
        for lane in self.exprs.lanes(Axis(ndim - 1)) {
            out.push(weighted_sum(lane.iter(), &weights)?);
        }
        let exprs = ArrayD::from_shape_vec(IxDyn(&self.shape()[..ndim - 1]), out)?;
        Ok(self.with_exprs(exprs))
    }

    /// Matrix product `self · rhs` for a 1-d or 2-d `self`.
    ///
    /// `(k,) · (k, m) -> (m,)` and `(n, k) · (k, m) -> (n, m)`.
    pub fn matmul(&self, rhs: &Array2<f64>) -> Result<ExprArray, ArrayError> {
        let (k, m) = rhs.dim();
        let columns: Vec<Vec<f64>> = rhs.columns().into_iter().map(|col| col.to_vec()).collect();
        let (shape, out) = match self.shape() {
            [len] if *len == k => {
                let out = columns
                    .iter()
                    .map(|col| weighted_sum(self.exprs.iter(), col))
                    .collect::<Result<Vec<_>, _>>()?;
                (vec![m], out)
            }
            [n, len] if *len == k => {
                let mut out = Vec::with_capacity(n * m);
                for row in self.exprs.lanes(Axis(1)) {
                    for col in &columns {
                        out.push(weighted_sum(row.iter(), col)?);
                    }
                }
                (vec![*n, m], out)
            }
            _ => {
                return Err(ArrayError::MatmulShape {
                    lhs: self.shape().to_vec(),
                    rhs: vec![k, m],
                });
            }
        };
        Ok(self.with_exprs(ArrayD::from_shape_vec(IxDyn(&shape), out)?))
    }

    /// Matrix product `lhs · self` for a 1-d or 2-d `self`.
    ///
    /// `(m, k) · (k,) -> (m,)` and `(m, k) · (k, n) -> (m, n)`.
    pub fn rmatmul(&self, lhs: &Array2<f64>) -> Result<ExprArray, ArrayError> {
        let (m, k) = lhs.dim();
        let rows: Vec<Vec<f64>> = lhs.rows().into_iter().map(|row| row.to_vec()).collect();
        let (shape, out) = match self.shape() {
            [len] if *len == k => {
                let out = rows
                    .iter()
                    .map(|row| weighted_sum(self.exprs.iter(), row))
                    .collect::<Result<Vec<_>, _>>()?;
                (vec![m], out)
            }
            [len, n] if *len == k => {
                let columns: Vec<_> = self.exprs.lanes(Axis(0)).into_iter().collect();
                let mut out = Vec::with_capacity(m * n);
                for row in &rows {
                    for col in &columns {
                        out.push(weighted_sum(col.iter(), row)?);
                    }
                }
                (vec![m, *n], out)
            }
            _ => {
                return Err(ArrayError::MatmulShape {
                    lhs: vec![m, k],
                    rhs: self.shape().to_vec(),
                });
            }
        };
        Ok(self.with_exprs(ArrayD::from_shape_vec(IxDyn(&shape), out)?))
    }

    // ── Comparisons (deferred) ──────────────────────────────

    /// Describe `self <sense> rhs` without touching the model.
    pub fn compare(&self, rhs: impl Into<Operand>, sense: ComparisonSense) -> Comparison {
        Comparison::new(self.clone(), rhs.into(), sense)
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

    // ── Readback ────────────────────────────────────────────

    /// Evaluate every element against the model's solved values.
    pub fn value<M: ScalarModel>(&self, model: &ArrayModel<M>) -> Result<ArrayD<f64>, ArrayError> {
        model.ensure_owns(self.token)?;
        let inner = model.inner();
        let values = self
            .exprs
            .iter()
            .map(|expr| expr.evaluate(|var_id| inner.get_val(var_id)))
            .collect::<Result<Vec<f64>, ModelError>>()?;
        Ok(ArrayD::from_shape_vec(self.exprs.raw_dim(), values)?)
    }
}

impl std::ops::Mul<f64> for &ExprArray {
    type Output = ExprArray;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl std::ops::Neg for &ExprArray {
    type Output = ExprArray;

    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}
