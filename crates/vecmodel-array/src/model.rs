//! The array model facade.

use std::time::Instant;

use ndarray::{Array, ArrayD, Dimension, IntoDimension, IxDyn};
use vecmodel_core::{
    Model, ScalarModel, Sense, Solver, SolverConfig, SolverError, SolverStatus, VarKind,
};
use vecmodel_expr::{ConstraintId, Expr, VariableId};

use crate::comparison::Comparison;
use crate::error::ArrayError;
use crate::objective::ObjectiveInput;
use crate::token::{ModelToken, ensure_same};
use crate::var_array::VarArray;

/// Vectorized front end over a scalar model.
///
/// Creates [`VarArray`]s, registers batches of [`Comparison`]s one scalar
/// constraint per element, and accepts array objectives. Every array it
/// hands out carries this facade's [`ModelToken`]; arrays from another
/// facade are rejected with [`ArrayError::ForeignModel`].
///
/// ```
/// use vecmodel_array::ArrayModel;
/// use vecmodel_core::VarKind;
///
/// let mut model = ArrayModel::new();
/// let x = model.add_var((2, 2), VarKind::Continuous, Some(0.0), None)?;
/// model.add_cons(vec![x.le(10.0), x.sum_axis(0)?.ge(1.0)])?;
/// model.maximize(x.sum())?;
/// assert_eq!(model.inner().num_constraints(), 6);
/// # Ok::<(), vecmodel_array::ArrayError>(())
/// ```
///
/// Constraints are passed as a `Vec`; anything else is a type error:
///
/// ```compile_fail
/// use vecmodel_array::ArrayModel;
///
/// let mut model = ArrayModel::new();
/// model.add_cons("not a list");
/// ```
#[derive(Debug)]
pub struct ArrayModel<M: ScalarModel = Model> {
    token: ModelToken,
    inner: M,
}

impl ArrayModel<Model> {
    /// Facade over a new, empty [`Model`].
    pub fn new() -> Self {
        Self::from_model(Model::new())
    }

    /// Solve the underlying model.
    pub fn optimize(
        &mut self,
        solver: &mut dyn Solver,
        config: &SolverConfig,
    ) -> Result<SolverStatus, SolverError> {
        self.inner.optimize(solver, config)
    }

    /// Objective value of the stored solution.
    pub fn objective_value(&self) -> Option<f64> {
        self.inner.objective_value()
    }

    /// Row activities for ids returned by [`ArrayModel::add_con`], in the
    /// same shape. `None` while no solution is stored.
    pub fn activity(&self, rows: &ArrayD<ConstraintId>) -> Option<ArrayD<f64>> {
        let values = rows
            .iter()
            .map(|row| self.inner.get_activity(*row))
            .collect::<Option<Vec<_>>>()?;
        ArrayD::from_shape_vec(rows.raw_dim(), values).ok()
    }
}

impl<M: ScalarModel + Default> Default for ArrayModel<M> {
    fn default() -> Self {
        Self::from_model(M::default())
    }
}

impl<M: ScalarModel> ArrayModel<M> {
    /// Wrap an existing model. Variables it already holds can be lifted
    /// into arrays with [`ArrayModel::array`].
    pub fn from_model(inner: M) -> Self {
        let token = ModelToken::fresh();
        tracing::debug!(
            component = "array",
            operation = "init",
            status = "success",
            token = token.inner(),
            num_variables = inner.num_variables(),
            "Created array model"
        );
        Self { token, inner }
    }

    pub fn token(&self) -> ModelToken {
        self.token
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut M {
        &mut self.inner
    }

    pub fn into_inner(self) -> M {
        self.inner
    }

    // ── Arrays ──────────────────────────────────────────────

    /// Wrap existing variables in an array bound to this model.
    ///
    /// No variables are created.
    pub fn array<D: Dimension>(
        &self,
        source: Array<VariableId, D>,
    ) -> Result<VarArray, ArrayError> {
        let vars = source.into_dyn();
        for var_id in vars.iter() {
            if !self.inner.contains_variable(*var_id) {
                tracing::warn!(
                    component = "array",
                    operation = "array",
                    status = "error",
                    var_id = var_id.inner(),
                    "Array element is not a variable of this model"
                );
                return Err(vecmodel_core::ModelError::InvalidVariableId(*var_id).into());
            }
        }
        Ok(VarArray::new(self.token, vars))
    }

    /// Wrap a flat, row-major list of variables in an array of `shape`.
    pub fn array_from_shape_vec<Sh: IntoDimension>(
        &self,
        shape: Sh,
        ids: Vec<VariableId>,
    ) -> Result<VarArray, ArrayError> {
        let shape = shape.into_dimension().into_dyn();
        let vars = ArrayD::from_shape_vec(shape, ids)?;
        self.array(vars)
    }

    /// Allocate one variable per element of `shape`, in row-major order.
    ///
    /// Binary variables ignore `lower`/`upper`. `None` bounds mean
    /// unbounded on that side. Kinds the underlying model cannot represent
    /// are rejected by it unchanged.
    pub fn add_var<Sh: IntoDimension>(
        &mut self,
        shape: Sh,
        kind: impl Into<VarKind>,
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> Result<VarArray, ArrayError> {
        self.add_var_inner(None, shape.into_dimension().into_dyn(), kind.into(), lower, upper)
    }

    /// Like [`ArrayModel::add_var`], naming each element `name[i,j,...]`.
    pub fn add_var_named<Sh: IntoDimension>(
        &mut self,
        name: &str,
        shape: Sh,
        kind: impl Into<VarKind>,
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> Result<VarArray, ArrayError> {
        self.add_var_inner(
            Some(name),
            shape.into_dimension().into_dyn(),
            kind.into(),
            lower,
            upper,
        )
    }

    fn add_var_inner(
        &mut self,
        name: Option<&str>,
        shape: IxDyn,
        kind: VarKind,
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> Result<VarArray, ArrayError> {
        let started = Instant::now();
        let (lower, upper) = match kind {
            VarKind::Binary => (None, None),
            _ => (lower, upper),
        };

        let mut ids = Vec::with_capacity(shape.size());
        for index in ndarray::indices(shape.clone()) {
            let var_id = self.inner.add_var(&kind, lower, upper)?;
            if let Some(name) = name {
                self.inner
                    .set_variable_name(var_id, element_name(name, index.slice()))?;
            }
            ids.push(var_id);
        }

        tracing::debug!(
            component = "array",
            operation = "add_var",
            status = "success",
            kind = %kind,
            shape = ?shape.slice(),
            count = ids.len(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Added variable array"
        );
        Ok(VarArray::new(self.token, ArrayD::from_shape_vec(shape, ids)?))
    }

    // ── Constraints ─────────────────────────────────────────

    /// Register every descriptor, one scalar constraint per element of its
    /// left side, in list order and row-major order within each.
    ///
    /// All descriptors are checked before any constraint is added, so a
    /// broadcast, ownership or unknown-variable failure leaves the model
    /// untouched. Errors from the underlying model during registration are
    /// returned as-is; rows added before the failing one stay registered.
    pub fn add_cons(&mut self, descriptors: Vec<Comparison>) -> Result<(), ArrayError> {
        let started = Instant::now();
        let lowered = descriptors
            .iter()
            .map(|descriptor| descriptor.lower(self.token))
            .collect::<Result<Vec<_>, _>>()?;
        for row in lowered.iter().flatten() {
            self.ensure_known_terms(row.expr(), "add_cons")?;
        }

        let mut num_rows = 0usize;
        for rows in lowered {
            for row in rows {
                self.inner.add_cons(row)?;
                num_rows += 1;
            }
        }

        tracing::debug!(
            component = "array",
            operation = "add_cons",
            status = "success",
            num_descriptors = descriptors.len(),
            num_rows,
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Registered constraint arrays"
        );
        Ok(())
    }

    /// Register a single descriptor and return the new constraint ids in
    /// the shape of its left side.
    pub fn add_con(&mut self, descriptor: Comparison) -> Result<ArrayD<ConstraintId>, ArrayError> {
        let rows = descriptor.lower(self.token)?;
        for row in &rows {
            self.ensure_known_terms(row.expr(), "add_con")?;
        }
        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            ids.push(self.inner.add_cons(row)?);
        }
        tracing::debug!(
            component = "array",
            operation = "add_con",
            status = "success",
            num_rows = ids.len(),
            "Registered constraint array"
        );
        Ok(ArrayD::from_shape_vec(
            IxDyn(descriptor.lhs().shape()),
            ids,
        )?)
    }

    // ── Objective ───────────────────────────────────────────

    /// Replace the objective.
    ///
    /// Arrays must hold exactly one element (shape `()` or `(1,)`); that
    /// element is used as the objective.
    pub fn set_objective(
        &mut self,
        objective: impl Into<ObjectiveInput>,
        sense: Sense,
    ) -> Result<(), ArrayError> {
        let expr = objective.into().into_expr(self.token).inspect_err(|err| {
            tracing::warn!(
                component = "array",
                operation = "set_objective",
                status = "error",
                code = err.code(),
                "Rejected objective"
            );
        })?;
        self.ensure_known_terms(&expr, "set_objective")?;
        self.inner.set_objective(expr, sense)?;
        Ok(())
    }

    pub fn minimize(&mut self, objective: impl Into<ObjectiveInput>) -> Result<(), ArrayError> {
        self.set_objective(objective, Sense::Minimize)
    }

    pub fn maximize(&mut self, objective: impl Into<ObjectiveInput>) -> Result<(), ArrayError> {
        self.set_objective(objective, Sense::Maximize)
    }

    /// Ok when `array_token` belongs to this model.
    pub fn ensure_owns(&self, array_token: ModelToken) -> Result<(), ArrayError> {
        ensure_same(self.token, array_token)
    }

    /// Every variable in `expr` must exist in the wrapped model.
    ///
    /// Scalar operands carry bare ids, so an id taken from another model
    /// passes whenever this model has a variable at the same index.
    fn ensure_known_terms(&self, expr: &Expr, operation: &'static str) -> Result<(), ArrayError> {
        match expr
            .linear_terms()
            .iter()
            .find(|(var_id, _)| !self.inner.contains_variable(*var_id))
        {
            None => Ok(()),
            Some((var_id, _)) => {
                tracing::warn!(
                    component = "array",
                    operation,
                    status = "error",
                    var_id = var_id.inner(),
                    "Expression references an unknown variable"
                );
                Err(vecmodel_core::ModelError::InvalidVariableId(*var_id).into())
            }
        }
    }
}

fn element_name(base: &str, index: &[usize]) -> String {
    if index.is_empty() {
        return base.to_string();
    }
    let parts: Vec<String> = index.iter().map(|i| i.to_string()).collect();
    format!("{base}[{}]", parts.join(","))
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests;
