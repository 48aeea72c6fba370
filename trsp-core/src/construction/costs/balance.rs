use super::{CostDelegate, Detour};
use crate::models::common::Cost;
use crate::models::solution::{ScheduleSummary, Solution, Tour, TourError, TourPatch, TourResult};
use crate::solver::search::Move;
use std::sync::Arc;

/// Balances workload between technicians: the solution cost is the sum of tour costs plus the
/// weighted max absolute deviation of a tour cost from their mean. Tours are measured by the base
/// delegate, so tour level evaluations are the base ones and only moves and solutions see the
/// disbalance.
pub struct TourBalance {
    base: Arc<dyn CostDelegate + Send + Sync>,
    weight: Cost,
}

impl TourBalance {
    /// Creates a new instance of `TourBalance`.
    pub fn new(base: Arc<dyn CostDelegate + Send + Sync>, weight: Cost) -> Self {
        Self { base, weight }
    }

    /// Returns total cost of tours with given costs.
    pub fn evaluate_costs(&self, costs: &[Cost]) -> Cost {
        if costs.is_empty() {
            return 0.;
        }

        let total = costs.iter().sum::<Cost>();
        let mean = total / costs.len() as Cost;
        let deviation = costs.iter().map(|cost| (cost - mean).abs()).fold(0., Cost::max);

        total + self.weight * deviation
    }

    fn get_tour_costs(&self, solution: &Solution) -> Vec<Cost> {
        solution.tours().iter().map(|tour| self.base.evaluate_tour(tour)).collect()
    }
}

impl CostDelegate for TourBalance {
    fn name(&self) -> &str {
        "tour-balance"
    }

    fn evaluate_summary(&self, summary: &ScheduleSummary) -> Cost {
        self.base.evaluate_summary(summary)
    }

    fn evaluate_tour(&self, tour: &Tour) -> Cost {
        self.base.evaluate_tour(tour)
    }

    fn evaluate_patch(&self, tour: &Tour, patch: &TourPatch) -> TourResult<Cost> {
        self.base.evaluate_patch(tour, patch)
    }

    fn evaluate_detour(&self, tour: &Tour, detour: &Detour) -> TourResult<Cost> {
        self.base.evaluate_detour(tour, detour)
    }

    fn evaluate_move(&self, solution: &Solution, mv: &Move) -> TourResult<Cost> {
        let mut costs = self.get_tour_costs(solution);
        let before = self.evaluate_costs(costs.as_slice());

        for change in mv.changes() {
            let cost = costs
                .get_mut(change.tour)
                .ok_or_else(|| TourError::precondition(format!("unknown tour {}", change.tour)))?;
            *cost = self.base.evaluate_summary(&change.summary);
        }

        Ok(self.evaluate_costs(costs.as_slice()) - before - mv.served_change() as Cost * self.unserved_penalty())
    }

    fn unserved_penalty(&self) -> Cost {
        self.base.unserved_penalty()
    }

    fn evaluate_solution(&self, solution: &Solution) -> Cost {
        let costs = self.get_tour_costs(solution);

        self.evaluate_costs(costs.as_slice()) + solution.unserved_count() as Cost * self.unserved_penalty()
    }
}
