//! Row-wise HiGHS problem builder and its solved counterpart.
//!
//! [`HighsProblem`] collects columns, rows and options; [`HighsProblem::solve`]
//! consumes it and returns a [`SolvedProblem`] holding everything read back
//! from HiGHS.

use highs::{Col, HighsStatus, RowProblem, Sense as HighsSense};
use std::fmt;
use tracing::{debug, trace, warn};
use vecmodel_core::{Sense, SolverConfig, SolverStatus};

use crate::status::solver_status;

/// Errors raised while building a problem.
#[derive(Debug, Clone, PartialEq)]
pub enum HighsProblemError {
    UnknownColumn { column: usize, num_columns: usize },
    /// HiGHS refused the problem at `stage` ("pass_model" or "run").
    Rejected { stage: &'static str, status: String },
}

impl HighsProblemError {
    pub fn code(&self) -> &'static str {
        match self {
            HighsProblemError::UnknownColumn { .. } => "HIGHS_UNKNOWN_COLUMN",
            HighsProblemError::Rejected { .. } => "HIGHS_REJECTED",
        }
    }
}

impl fmt::Display for HighsProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighsProblemError::UnknownColumn {
                column,
                num_columns,
            } => write!(
                f,
                "[{}] Row references column {} but the problem has {} columns",
                self.code(),
                column,
                num_columns
            ),
            HighsProblemError::Rejected { stage, status } => write!(
                f,
                "[{}] HiGHS rejected the problem during {} (status {})",
                self.code(),
                stage,
                status
            ),
        }
    }
}

impl std::error::Error for HighsProblemError {}

/// A single HiGHS option value.
#[derive(Debug, Clone, PartialEq)]
pub enum HighsOption {
    Int(i32),
    Float(f64),
    Str(&'static str),
}

/// Translate a [`SolverConfig`] into HiGHS option names and values.
///
/// Console output is handled separately by [`HighsProblem::configure`].
pub fn options_from_config(config: &SolverConfig) -> Vec<(&'static str, HighsOption)> {
    let mut options = Vec::new();
    if let Some(limit) = config.time_limit {
        options.push(("time_limit", HighsOption::Float(limit)));
    }
    if let Some(gap) = config.mip_gap {
        options.push(("mip_rel_gap", HighsOption::Float(gap)));
    }
    if let Some(presolve) = config.presolve {
        options.push(("presolve", HighsOption::Str(if presolve { "on" } else { "off" })));
    }
    if let Some(threads) = config.threads {
        options.push(("threads", HighsOption::Int(i32::try_from(threads).unwrap_or(i32::MAX))));
    }
    if let Some(tol) = config.tolerance {
        options.push(("primal_feasibility_tolerance", HighsOption::Float(tol)));
        options.push(("dual_feasibility_tolerance", HighsOption::Float(tol)));
    }
    options
}

/// Columns, rows and options for one HiGHS solve.
pub struct HighsProblem {
    problem: RowProblem,
    columns: Vec<Col>,
    num_rows: usize,
    log_to_console: bool,
    options: Vec<(&'static str, HighsOption)>,
}

impl HighsProblem {
    pub fn new() -> Self {
        HighsProblem {
            problem: RowProblem::default(),
            columns: Vec::new(),
            num_rows: 0,
            log_to_console: false,
            options: Vec::new(),
        }
    }

    /// Apply solver options. Any verbosity above zero turns console output on.
    pub fn configure(&mut self, config: &SolverConfig) {
        let verbose = config.verbosity.is_some_and(|level| level > 0);
        self.log_to_console = config.log_to_console.unwrap_or(false) || verbose;
        self.options.extend(options_from_config(config));
    }

    /// Add a column with objective coefficient `cost`; returns its index.
    pub fn add_column(&mut self, lower: f64, upper: f64, cost: f64, integer: bool) -> usize {
        let col = if integer {
            self.problem.add_integer_column(cost, lower..=upper)
        } else {
            self.problem.add_column(cost, lower..=upper)
        };
        self.columns.push(col);
        self.columns.len() - 1
    }

    /// Add `lower <= Σ coeff * column <= upper`; returns the row index.
    ///
    /// Nothing is added when a term names an unknown column.
    pub fn add_row<I>(
        &mut self,
        lower: f64,
        upper: f64,
        terms: I,
    ) -> Result<usize, HighsProblemError>
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let num_columns = self.columns.len();
        let factors = terms
            .into_iter()
            .map(|(column, coeff)| {
                self.columns
                    .get(column)
                    .map(|col| (*col, coeff))
                    .ok_or(HighsProblemError::UnknownColumn {
                        column,
                        num_columns,
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|err| {
                warn!(
                    component = "solver",
                    operation = "add_row",
                    status = "error",
                    code = err.code(),
                    "Rejected HiGHS row"
                );
            })?;
        self.problem.add_row(lower..=upper, factors);
        self.num_rows += 1;
        Ok(self.num_rows - 1)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Run HiGHS and read back status, objective and primal values.
    ///
    /// HiGHS errors while loading or running the problem come back as
    /// [`HighsProblemError::Rejected`]. Option names and values are not
    /// checked here; `SolverConfig::validate` keeps them in HiGHS' ranges.
    pub fn solve(self, sense: Sense) -> Result<SolvedProblem, HighsProblemError> {
        debug!(
            component = "solver",
            operation = "solve",
            status = "start",
            num_cols = self.columns.len(),
            num_rows = self.num_rows,
            sense = ?sense,
            num_options = self.options.len(),
            "Solving HiGHS problem"
        );

        let highs_sense = match sense {
            Sense::Minimize => HighsSense::Minimise,
            Sense::Maximize => HighsSense::Maximise,
        };
        let mut model = self
            .problem
            .try_optimise(highs_sense)
            .map_err(|status| rejected("pass_model", status))?;
        if self.log_to_console {
            model.set_option("output_flag", true);
            model.set_option("log_to_console", true);
        } else {
            model.make_quiet();
        }
        for (name, value) in self.options {
            match value {
                HighsOption::Int(val) => model.set_option(name, val),
                HighsOption::Float(val) => model.set_option(name, val),
                HighsOption::Str(val) => model.set_option(name, val),
            }
        }

        let solved = model.try_solve().map_err(|status| rejected("run", status))?;
        let status = solver_status(solved.status());
        let solution = solved.get_solution();
        trace!(
            component = "solver",
            operation = "solve",
            status = "success",
            solver_status = status.as_str(),
            "Solution status received"
        );
        Ok(SolvedProblem {
            status,
            objective_value: solved.objective_value(),
            col_values: solution.columns().to_vec(),
            row_values: solution.rows().to_vec(),
        })
    }
}

fn rejected(stage: &'static str, status: HighsStatus) -> HighsProblemError {
    let err = HighsProblemError::Rejected {
        stage,
        status: format!("{status:?}"),
    };
    warn!(
        component = "solver",
        operation = "solve",
        status = "error",
        code = err.code(),
        stage,
        "HiGHS returned an error status"
    );
    err
}

impl Default for HighsProblem {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HighsProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HighsProblem")
            .field("num_columns", &self.columns.len())
            .field("num_rows", &self.num_rows)
            .field("log_to_console", &self.log_to_console)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Everything read back from one HiGHS solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedProblem {
    pub status: SolverStatus,
    pub objective_value: f64,
    /// Indexed like the columns passed to [`HighsProblem::add_column`].
    pub col_values: Vec<f64>,
    /// Row activities, indexed like [`HighsProblem::add_row`] results.
    pub row_values: Vec<f64>,
}
