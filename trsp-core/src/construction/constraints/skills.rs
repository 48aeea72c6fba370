use super::MoveConstraint;
use crate::models::solution::{Solution, Tour};
use crate::solver::search::Move;

/// Checks that a technician has all skills required by the requests of its tour and has required
/// tools at every request: either carried from home or picked up at the main depot visited before.
#[derive(Clone, Debug, Default)]
pub struct SkillsConstraint;

impl MoveConstraint for SkillsConstraint {
    fn name(&self) -> &str {
        "skills"
    }

    fn is_feasible(&self, solution: &Solution, mv: &Move) -> bool {
        let instance = solution.instance();

        mv.changes().iter().all(|change| {
            change.summary.missing_tools == 0
                && instance.technician(change.tour).is_some_and(|technician| {
                    change.patch.nodes.iter().all(|id| technician.has_skills(instance.node(*id)))
                })
        })
    }

    fn is_tour_feasible(&self, tour: &Tour) -> bool {
        let technician = tour.technician();

        tour.summary().missing_tools == 0 && tour.requests().all(|id| technician.has_skills(tour.instance().node(id)))
    }
}
