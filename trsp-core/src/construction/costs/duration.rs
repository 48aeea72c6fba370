use super::{CostDelegate, Detour, DetourKind};
use crate::models::common::Cost;
use crate::models::solution::{ScheduleSummary, ScheduleTiming, Tour, TourResult};

/// Minimizes tour duration: the time between the first service start and the last departure.
/// A single insertion is evaluated in constant time by pushing the schedule forward.
#[derive(Clone, Debug, Default)]
pub struct DurationCost;

impl CostDelegate for DurationCost {
    fn name(&self) -> &str {
        "duration"
    }

    fn evaluate_summary(&self, summary: &ScheduleSummary) -> Cost {
        summary.minimal_duration()
    }

    fn evaluate_detour(&self, tour: &Tour, detour: &Detour) -> TourResult<Cost> {
        evaluate_timing_detour(self, tour, detour, ScheduleTiming::minimal_duration)
    }
}

/// Minimizes working time: tour duration when the technician leaves home as late as possible
/// without delaying the tour end. A single insertion is evaluated in constant time by pushing
/// the schedule forward.
#[derive(Clone, Debug, Default)]
pub struct WorkingTimeCost;

impl CostDelegate for WorkingTimeCost {
    fn name(&self) -> &str {
        "working-time"
    }

    fn evaluate_summary(&self, summary: &ScheduleSummary) -> Cost {
        summary.working_time()
    }

    fn evaluate_detour(&self, tour: &Tour, detour: &Detour) -> TourResult<Cost> {
        evaluate_timing_detour(self, tour, detour, ScheduleTiming::working_time)
    }
}

/// Evaluates a single insertion from pushed forward timing. Removals, double detours and
/// insertions which let the successor start earlier fall back to the tour patch evaluation.
fn evaluate_timing_detour(
    cost: &dyn CostDelegate,
    tour: &Tour,
    detour: &Detour,
    evaluate: fn(&ScheduleTiming) -> Cost,
) -> TourResult<Cost> {
    let patch = detour.to_patch(tour)?;

    if detour.kind == DetourKind::Insertion && detour.second.is_none() {
        if let Some(timing) = tour.push_forward(patch.start, detour.first.node)? {
            return Ok(evaluate(&timing) - cost.evaluate_tour(tour));
        }
    }

    cost.evaluate_patch(tour, &patch)
}
