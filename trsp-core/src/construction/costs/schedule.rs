use super::CostDelegate;
use crate::models::common::Cost;
use crate::models::solution::ScheduleSummary;

/// Minimizes travel and service time with a penalty for late service.
#[derive(Clone, Debug)]
pub struct ScheduleCost {
    lateness_weight: Cost,
}

impl ScheduleCost {
    /// Creates a new instance of `ScheduleCost`.
    pub fn new(lateness_weight: Cost) -> Self {
        Self { lateness_weight }
    }
}

impl Default for ScheduleCost {
    fn default() -> Self {
        Self::new(1.)
    }
}

impl CostDelegate for ScheduleCost {
    fn name(&self) -> &str {
        "schedule"
    }

    fn evaluate_summary(&self, summary: &ScheduleSummary) -> Cost {
        summary.travel_time + summary.service_time + self.lateness_weight * summary.lateness
    }
}
