use super::{CostDelegate, Detour, DetourKind};
use crate::models::common::Cost;
use crate::models::solution::{ScheduleSummary, Tour, TourResult};

/// Minimizes total travel distance. Detours are evaluated analytically in constant time.
#[derive(Clone, Debug, Default)]
pub struct DistanceCost;

impl CostDelegate for DistanceCost {
    fn name(&self) -> &str {
        "distance"
    }

    fn evaluate_summary(&self, summary: &ScheduleSummary) -> Cost {
        summary.distance
    }

    fn evaluate_detour(&self, tour: &Tour, detour: &Detour) -> TourResult<Cost> {
        detour.validate(tour)?;

        let instance = tour.instance();
        let detour_cost = detour
            .legs()
            .map(|leg| {
                instance.distance(leg.pred, leg.node) + instance.distance(leg.node, leg.succ)
                    - instance.distance(leg.pred, leg.succ)
            })
            .sum::<Cost>();

        Ok(match detour.kind {
            DetourKind::Insertion => detour_cost,
            DetourKind::Removal => -detour_cost,
        })
    }
}
