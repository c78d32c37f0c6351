//! Solver configuration types.

use crate::SolverError;

/// Smallest feasibility tolerance backends accept.
pub const MIN_TOLERANCE: f64 = 1e-10;

/// Options forwarded to the backend on the next solve.
///
/// Every field is optional; `None` leaves the backend default in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverConfig {
    /// Time limit in seconds.
    pub time_limit: Option<f64>,
    /// Relative MIP gap tolerance.
    pub mip_gap: Option<f64>,
    /// Verbosity level; `0` silences backend output.
    pub verbosity: Option<u32>,
    /// Enable/disable presolve.
    pub presolve: Option<bool>,
    /// Number of threads to use.
    pub threads: Option<u32>,
    /// Primal and dual feasibility tolerance.
    pub tolerance: Option<f64>,
    /// Echo backend output to the console.
    pub log_to_console: Option<bool>,
}

impl SolverConfig {
    /// Create a new configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    pub fn with_mip_gap(mut self, gap: f64) -> Self {
        self.mip_gap = Some(gap);
        self
    }

    pub fn with_verbosity(mut self, level: u32) -> Self {
        self.verbosity = Some(level);
        self
    }

    pub fn with_presolve(mut self, enabled: bool) -> Self {
        self.presolve = Some(enabled);
        self
    }

    pub fn with_threads(mut self, count: u32) -> Self {
        self.threads = Some(count);
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = Some(tol);
        self
    }

    pub fn with_log_to_console(mut self, enabled: bool) -> Self {
        self.log_to_console = Some(enabled);
        self
    }

    /// Check if this configuration is completely empty (all defaults).
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Reject values the backend would misinterpret.
    pub fn validate(&self) -> Result<(), SolverError> {
        if let Some(limit) = self.time_limit
            && !(limit.is_finite() && limit > 0.0)
        {
            return Err(invalid("time_limit", format!("must be positive and finite (got {limit})")));
        }
        if let Some(gap) = self.mip_gap
            && !(gap.is_finite() && gap >= 0.0)
        {
            return Err(invalid("mip_gap", format!("must be non-negative (got {gap})")));
        }
        if let Some(tol) = self.tolerance
            && !(tol.is_finite() && tol >= MIN_TOLERANCE)
        {
            return Err(invalid(
                "tolerance",
                format!("must be finite and at least {MIN_TOLERANCE:e} (got {tol})"),
            ));
        }
        if self.threads == Some(0) {
            return Err(invalid("threads", "must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn invalid(option: &'static str, reason: String) -> SolverError {
    SolverError::InvalidConfig { option, reason }
}
