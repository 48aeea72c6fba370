use super::MoveConstraint;
use crate::models::solution::{Solution, Tour};
use crate::solver::search::Move;
use trsp_heuristics::utils::DEFAULT_TOLERANCE;

/// Checks that every service starts within its time window.
#[derive(Clone, Debug, Default)]
pub struct TimeWindowConstraint;

impl MoveConstraint for TimeWindowConstraint {
    fn name(&self) -> &str {
        "time-window"
    }

    fn is_feasible(&self, _: &Solution, mv: &Move) -> bool {
        mv.changes().iter().all(|change| change.summary.lateness <= DEFAULT_TOLERANCE)
    }

    fn is_tour_feasible(&self, tour: &Tour) -> bool {
        tour.total_lateness() <= DEFAULT_TOLERANCE
    }
}
