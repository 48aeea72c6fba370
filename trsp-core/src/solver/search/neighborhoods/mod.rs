//! Neighborhoods enumerate candidate moves of the current solution.

#[cfg(test)]
#[path = "../../../../tests/unit/solver/search/neighborhoods_test.rs"]
mod neighborhoods_test;

mod depot_trip;
pub use self::depot_trip::DepotTrip;

mod or_opt;
pub use self::or_opt::OrOpt;

mod relocate;
pub use self::relocate::Relocate;

mod string_exchange;
pub use self::string_exchange::StringExchange;

mod swap;
pub use self::swap::Swap;

mod two_opt;
pub use self::two_opt::TwoOpt;

use super::MoveKind;
use crate::models::solution::{Solution, Tour};
use std::ops::Range;

/// Enumerates a bounded set of candidate moves. Candidates are structurally valid for the given
/// solution, but can be infeasible or non improving.
pub trait Neighborhood {
    /// Returns neighborhood name.
    fn name(&self) -> &str;

    /// Returns candidate moves in deterministic order.
    fn candidates<'a>(&'a self, solution: &'a Solution) -> Box<dyn Iterator<Item = MoveKind> + 'a>;
}

/// Returns all segment starts of given length within tour interior.
fn segment_starts(tour: &Tour, length: usize) -> Range<usize> {
    let positions = tour.request_positions();

    positions.start..(positions.end + 1).saturating_sub(length).max(positions.start)
}

/// Returns true if the segment can move to another tour: a depot visit stays in its own tour.
fn is_transferable(tour: &Tour, start: usize, length: usize) -> bool {
    tour.nodes()[start..start + length].iter().all(|id| !tour.instance().is_depot(*id))
}

/// Returns true if inserting a segment `[start, start + length)` before `to` leaves the tour as is.
fn is_same_place(start: usize, length: usize, to: usize) -> bool {
    to >= start && to <= start + length
}
