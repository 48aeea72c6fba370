//! Cost delegates evaluate tours, tour changes and whole solutions.
//!
//! A delegate is defined by its cost of a [ScheduleSummary]: since a summary can be obtained for
//! a non-materialized tour change via [Tour::summarize], every delegate can evaluate moves
//! without mutating tours. Delegates which can do it faster, override the corresponding methods.

#[cfg(test)]
#[path = "../../../tests/unit/construction/costs/costs_test.rs"]
mod costs_test;

mod balance;
pub use self::balance::TourBalance;

mod detour;
pub use self::detour::*;

mod distance;
pub use self::distance::DistanceCost;

mod duration;
pub use self::duration::{DurationCost, WorkingTimeCost};

mod penalty;
pub use self::penalty::UnservedPenalty;

mod schedule;
pub use self::schedule::ScheduleCost;

use crate::models::common::Cost;
use crate::models::solution::{ScheduleSummary, Solution, Tour, TourPatch, TourResult};
use crate::solver::search::Move;

/// Evaluates cost of tours and solutions. Returned deltas are `cost after - cost before`, so a
/// negative delta means an improvement.
pub trait CostDelegate {
    /// Returns delegate name.
    fn name(&self) -> &str;

    /// Returns cost of a tour described by its schedule summary.
    fn evaluate_summary(&self, summary: &ScheduleSummary) -> Cost;

    /// Returns cost of the tour.
    fn evaluate_tour(&self, tour: &Tour) -> Cost {
        self.evaluate_summary(&tour.summary())
    }

    /// Returns cost change of applying the patch to the tour.
    fn evaluate_patch(&self, tour: &Tour, patch: &TourPatch) -> TourResult<Cost> {
        let summary = tour.summarize(patch)?;

        Ok(self.evaluate_summary(&summary) - self.evaluate_tour(tour))
    }

    /// Returns cost change of a detour: removing or inserting one or two nodes simultaneously.
    /// Fails with precondition error if the detour does not match the tour structure.
    fn evaluate_detour(&self, tour: &Tour, detour: &Detour) -> TourResult<Cost> {
        self.evaluate_patch(tour, &detour.to_patch(tour)?)
    }

    /// Returns cost change of the move including change of unserved requests penalty.
    fn evaluate_move(&self, solution: &Solution, mv: &Move) -> TourResult<Cost> {
        let tours_delta = mv
            .changes()
            .iter()
            .map(|change| {
                let tour = solution.get_tour(change.tour)?;
                Ok(self.evaluate_summary(&change.summary) - self.evaluate_tour(tour))
            })
            .sum::<TourResult<Cost>>()?;

        Ok(tours_delta - mv.served_change() as Cost * self.unserved_penalty())
    }

    /// Returns penalty for one unserved request.
    fn unserved_penalty(&self) -> Cost {
        0.
    }

    /// Returns total cost of the solution.
    fn evaluate_solution(&self, solution: &Solution) -> Cost {
        let tours = solution.tours().iter().map(|tour| self.evaluate_tour(tour)).sum::<Cost>();

        tours + solution.unserved_count() as Cost * self.unserved_penalty()
    }
}
