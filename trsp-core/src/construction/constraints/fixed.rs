use super::MoveConstraint;
use crate::models::solution::{Solution, Tour};
use crate::solver::search::Move;

/// Protects pinned nodes: they cannot be moved to another position, another tour or removed.
#[derive(Clone, Debug, Default)]
pub struct FixedNodesConstraint;

impl MoveConstraint for FixedNodesConstraint {
    fn name(&self) -> &str {
        "fixed-nodes"
    }

    fn is_feasible(&self, solution: &Solution, mv: &Move) -> bool {
        mv.moved_nodes().iter().all(|id| !solution.is_pinned(*id))
    }

    fn is_tour_feasible(&self, _: &Tour) -> bool {
        true
    }
}
