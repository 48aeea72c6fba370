use super::MoveConstraint;
use crate::models::solution::{Solution, Tour};
use crate::solver::search::Move;

/// Checks that cumulative load never exceeds technician capacity in any dimension. Spare parts
/// are restocked at the main depot, so load starts from zero after its visit.
#[derive(Clone, Debug, Default)]
pub struct CapacityConstraint;

impl MoveConstraint for CapacityConstraint {
    fn name(&self) -> &str {
        "capacity"
    }

    fn is_feasible(&self, solution: &Solution, mv: &Move) -> bool {
        mv.changes().iter().all(|change| {
            solution
                .instance()
                .technician(change.tour)
                .is_some_and(|technician| technician.capacity.can_fit(&change.summary.max_load))
        })
    }

    fn is_tour_feasible(&self, tour: &Tour) -> bool {
        tour.technician().capacity.can_fit(&tour.max_load())
    }
}
