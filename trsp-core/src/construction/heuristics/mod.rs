//! Construction heuristics build an initial solution from unserved requests.

#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/heuristics_test.rs"]
mod heuristics_test;

mod insertion;
pub use self::insertion::CheapestInsertion;

mod savings;
pub use self::savings::ClarkeWright;

use crate::models::solution::{Solution, TourResult};
use crate::solver::search::SearchContext;

/// Builds a solution by assigning unserved requests to tours. Requests which cannot be assigned
/// feasibly stay unserved.
pub trait Construction {
    /// Returns heuristic name.
    fn name(&self) -> &str;

    /// Assigns unserved requests of the solution.
    fn construct(&self, solution: Solution, context: &SearchContext) -> TourResult<Solution>;
}
