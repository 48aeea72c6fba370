//! Built-in feasibility constraints applied to moves and tours.
//!
//! ## Constraint
//!
//! Constraint represents some limitation which should be applied to solution. A good examples:
//!
//! - **time-window**: a request can be served only in specific time window, e.g. from 9am till 11am
//! - **capacity**: a technician cannot carry more spare parts than its capacity allows
//! - **skills**: a request can be served only by a technician with required skills and tools
//!
//! ## Design
//!
//! Constraints are pure predicates: they read the solution and the move, but never mutate them.
//! A move carries schedule summaries of the changed tours, so most constraints check a summary
//! instead of the tour itself. The [ConstraintHandler] combines constraints with AND semantics and
//! stops on the first violation. Infeasibility is an expected outcome, not an error.

#[cfg(test)]
#[path = "../../../tests/unit/construction/constraints/constraints_test.rs"]
mod constraints_test;

mod capacity;
pub use self::capacity::CapacityConstraint;

mod fixed;
pub use self::fixed::FixedNodesConstraint;

mod max_duration;
pub use self::max_duration::MaxDurationConstraint;

mod skills;
pub use self::skills::SkillsConstraint;

mod time_window;
pub use self::time_window::TimeWindowConstraint;

use crate::models::solution::{Solution, Tour};
use crate::solver::search::Move;
use std::sync::Arc;

/// A feasibility predicate over a solution and a move.
pub trait MoveConstraint {
    /// Returns constraint name.
    fn name(&self) -> &str;

    /// Checks whether the move keeps the solution feasible.
    fn is_feasible(&self, solution: &Solution, mv: &Move) -> bool;

    /// Checks whether the tour is feasible.
    fn is_tour_feasible(&self, tour: &Tour) -> bool;
}

/// Combines constraints with short-circuit AND semantics.
#[derive(Clone, Default)]
pub struct ConstraintHandler {
    constraints: Vec<Arc<dyn MoveConstraint + Send + Sync>>,
}

impl ConstraintHandler {
    /// Creates a new instance of `ConstraintHandler`.
    pub fn new(constraints: Vec<Arc<dyn MoveConstraint + Send + Sync>>) -> Self {
        Self { constraints }
    }

    /// Adds a constraint which is checked after existing ones.
    pub fn add_constraint(mut self, constraint: Arc<dyn MoveConstraint + Send + Sync>) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Returns names of all constraints in check order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.constraints.iter().map(|constraint| constraint.name())
    }

    /// Checks whether the move is feasible for all constraints.
    pub fn is_feasible(&self, solution: &Solution, mv: &Move) -> bool {
        self.constraints.iter().all(|constraint| constraint.is_feasible(solution, mv))
    }

    /// Checks whether the tour is feasible for all constraints.
    pub fn is_tour_feasible(&self, tour: &Tour) -> bool {
        self.constraints.iter().all(|constraint| constraint.is_tour_feasible(tour))
    }

    /// Returns name of the first constraint violated by the move.
    pub fn violation(&self, solution: &Solution, mv: &Move) -> Option<&str> {
        self.constraints.iter().find(|constraint| !constraint.is_feasible(solution, mv)).map(|constraint| constraint.name())
    }

    /// Returns name of the first constraint violated by the tour.
    pub fn tour_violation(&self, tour: &Tour) -> Option<&str> {
        self.constraints.iter().find(|constraint| !constraint.is_tour_feasible(tour)).map(|constraint| constraint.name())
    }
}
