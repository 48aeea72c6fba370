use super::{CostDelegate, Detour};
use crate::models::common::Cost;
use crate::models::solution::{ScheduleSummary, Solution, Tour, TourPatch, TourResult};
use crate::solver::search::Move;
use std::sync::Arc;

/// Adds a fixed penalty per unserved request to the inner delegate. Without it, removing a
/// request is usually an improvement.
pub struct UnservedPenalty {
    inner: Arc<dyn CostDelegate + Send + Sync>,
    penalty: Cost,
}

impl UnservedPenalty {
    /// Creates a new instance of `UnservedPenalty`.
    pub fn new(inner: Arc<dyn CostDelegate + Send + Sync>, penalty: Cost) -> Self {
        Self { inner, penalty }
    }

    /// Returns penalty on top of the one the inner delegate already applies.
    fn extra_penalty(&self) -> Cost {
        self.penalty - self.inner.unserved_penalty()
    }
}

impl CostDelegate for UnservedPenalty {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn evaluate_summary(&self, summary: &ScheduleSummary) -> Cost {
        self.inner.evaluate_summary(summary)
    }

    fn evaluate_tour(&self, tour: &Tour) -> Cost {
        self.inner.evaluate_tour(tour)
    }

    fn evaluate_patch(&self, tour: &Tour, patch: &TourPatch) -> TourResult<Cost> {
        self.inner.evaluate_patch(tour, patch)
    }

    fn evaluate_detour(&self, tour: &Tour, detour: &Detour) -> TourResult<Cost> {
        self.inner.evaluate_detour(tour, detour)
    }

    fn evaluate_move(&self, solution: &Solution, mv: &Move) -> TourResult<Cost> {
        let delta = self.inner.evaluate_move(solution, mv)?;

        Ok(delta - mv.served_change() as Cost * self.extra_penalty())
    }

    fn unserved_penalty(&self) -> Cost {
        self.penalty
    }

    fn evaluate_solution(&self, solution: &Solution) -> Cost {
        self.inner.evaluate_solution(solution) + solution.unserved_count() as Cost * self.extra_penalty()
    }
}
