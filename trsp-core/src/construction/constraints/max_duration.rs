use super::MoveConstraint;
use crate::models::common::Duration;
use crate::models::solution::{Solution, Tour};
use crate::solver::search::Move;
use trsp_heuristics::utils::DEFAULT_TOLERANCE;

/// Limits working time of every tour.
#[derive(Clone, Debug)]
pub struct MaxDurationConstraint {
    limit: Duration,
}

impl MaxDurationConstraint {
    /// Creates a new instance of `MaxDurationConstraint`.
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }
}

impl MoveConstraint for MaxDurationConstraint {
    fn name(&self) -> &str {
        "max-duration"
    }

    fn is_feasible(&self, _: &Solution, mv: &Move) -> bool {
        mv.changes().iter().all(|change| change.summary.working_time() <= self.limit + DEFAULT_TOLERANCE)
    }

    fn is_tour_feasible(&self, tour: &Tour) -> bool {
        tour.working_time() <= self.limit + DEFAULT_TOLERANCE
    }
}
