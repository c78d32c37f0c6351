//! HiGHS model status to [`SolverStatus`].

use highs::HighsModelStatus;
use vecmodel_solver::SolverStatus;

pub(crate) fn solver_status(status: HighsModelStatus) -> SolverStatus {
    match status {
        HighsModelStatus::Optimal => SolverStatus::Optimal,
        HighsModelStatus::Infeasible => SolverStatus::Infeasible,
        HighsModelStatus::Unbounded => SolverStatus::Unbounded,
        HighsModelStatus::UnboundedOrInfeasible => SolverStatus::UnboundedOrInfeasible,
        HighsModelStatus::ReachedTimeLimit => SolverStatus::ReachedTimeLimit,
        HighsModelStatus::ReachedIterationLimit => SolverStatus::ReachedIterationLimit,
        _ => SolverStatus::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(solver_status(HighsModelStatus::Optimal), SolverStatus::Optimal);
        assert_eq!(
            solver_status(HighsModelStatus::ReachedTimeLimit),
            SolverStatus::ReachedTimeLimit
        );
        assert_eq!(
            solver_status(HighsModelStatus::UnboundedOrInfeasible),
            SolverStatus::UnboundedOrInfeasible
        );
        assert_eq!(solver_status(HighsModelStatus::NotSet), SolverStatus::Unknown);
        assert!(!solver_status(HighsModelStatus::Infeasible).has_solution());
    }
}
