//! HiGHS backend for [`vecmodel_core::Model`].

use crate::problem::HighsProblem;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, trace, warn};
use vecmodel_core::{Model, Sense, Solution, Solver, SolverConfig, SolverError, SolverStatus};
use vecmodel_expr::VariableId;

/// Solves a [`Model`] by rebuilding it as a HiGHS row problem on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Solver for HighsSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve(&mut self, model: &Model, config: &SolverConfig) -> Result<Solution, SolverError> {
        solve_model(model, config)
    }
}

/// Objective coefficients by variable. A model without an objective is
/// solved as a feasibility problem.
fn collect_objective_coefficients(model: &Model) -> (Sense, BTreeMap<VariableId, f64>) {
    let objective = model.objective();
    let sense = objective.sense.unwrap_or_else(|| {
        debug!(
            component = "solver",
            operation = "collect_objective",
            status = "success",
            "No objective set; solving for feasibility"
        );
        Sense::Minimize
    });

    let mut costs: BTreeMap<VariableId, f64> = BTreeMap::new();
    for (var_id, coeff) in &objective.terms {
        *costs.entry(*var_id).or_insert(0.0) += *coeff;
    }
    (sense, costs)
}

/// One column per variable, in id order, so column index equals
/// `VariableId::index`.
fn add_columns(model: &Model, problem: &mut HighsProblem, costs: &BTreeMap<VariableId, f64>) {
    for (var_id, var) in model.variables() {
        let cost = costs.get(&var_id).copied().unwrap_or(0.0);
        let column = problem.add_column(var.bounds.lower, var.bounds.upper, cost, var.is_integer);
        trace!(
            component = "solver",
            operation = "add_column",
            status = "success",
            var_id = var_id.inner(),
            column,
            lower = var.bounds.lower,
            upper = var.bounds.upper,
            cost,
            is_integer = var.is_integer,
            "Added column to HiGHS"
        );
    }
}

fn add_rows(model: &Model, problem: &mut HighsProblem) -> Result<(), SolverError> {
    let started = Instant::now();
    for (constraint_id, constraint) in model.constraints() {
        let terms = constraint
            .terms
            .iter()
            .map(|(var_id, coeff)| (var_id.index(), *coeff));
        let row = problem
            .add_row(constraint.bounds.lower, constraint.bounds.upper, terms)
            .map_err(|err| SolverError::InternalError(err.to_string()))?;
        trace!(
            component = "solver",
            operation = "add_row",
            status = "success",
            constraint_id = constraint_id.inner(),
            row,
            lower = constraint.bounds.lower,
            upper = constraint.bounds.upper,
            num_coeffs = constraint.terms.len(),
            "Added row to HiGHS"
        );
    }
    debug!(
        component = "solver",
        operation = "build_rows",
        status = "success",
        num_constraints = model.num_constraints(),
        nnz = model.num_coefficients(),
        duration_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Added all rows to HiGHS"
    );
    Ok(())
}

fn solve_model(model: &Model, config: &SolverConfig) -> Result<Solution, SolverError> {
    if model.num_variables() == 0 {
        return Err(SolverError::EmptyModel);
    }
    let solve_started = Instant::now();

    let (sense, costs) = collect_objective_coefficients(model);
    let mut problem = HighsProblem::new();
    problem.configure(config);
    add_columns(model, &mut problem, &costs);
    add_rows(model, &mut problem)?;

    let solved = problem
        .solve(sense)
        .map_err(|err| SolverError::InternalError(err.to_string()))?;
    let solve_time_seconds = solve_started.elapsed().as_secs_f64();
    let status = solved.status;

    if !status.has_solution() {
        warn!(
            component = "solver",
            operation = "solve",
            status = "warn",
            solver = "highs",
            solver_status = status.as_str(),
            duration_ms = solve_time_seconds * 1000.0,
            "Solver did not find a solution"
        );
        return Err(SolverError::SolveFailure { status });
    }
    if status != SolverStatus::Optimal {
        warn!(
            component = "solver",
            operation = "solve",
            status = "warn",
            solver = "highs",
            solver_status = status.as_str(),
            "Solver stopped at a limit; returning best solution found"
        );
    }

    debug!(
        component = "solver",
        operation = "solve",
        status = "success",
        solver = "highs",
        solver_status = status.as_str(),
        objective_value = solved.objective_value,
        duration_ms = solve_time_seconds * 1000.0,
        "HiGHS solve completed"
    );

    Ok(Solution {
        primal_values: solved.col_values,
        row_values: solved.row_values,
        objective_value: solved.objective_value,
        status,
        solve_time_seconds,
    })
}
