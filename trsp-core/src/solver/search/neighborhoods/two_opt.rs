use super::Neighborhood;
use crate::models::solution::Solution;
use crate::solver::search::MoveKind;

/// Implements a classical TSP's two opt move: reverses a segment of a tour.
/// For algorithm details, see https://en.wikipedia.org/wiki/2-opt
#[derive(Clone, Debug, Default)]
pub struct TwoOpt;

impl Neighborhood for TwoOpt {
    fn name(&self) -> &str {
        "two-opt"
    }

    fn candidates<'a>(&'a self, solution: &'a Solution) -> Box<dyn Iterator<Item = MoveKind> + 'a> {
        Box::new(solution.tours().iter().flat_map(|tour| {
            let positions = tour.request_positions();
            let end = positions.end;

            positions.flat_map(move |from| {
                (from + 1..end).map(move |to| MoveKind::TwoOpt { tour: tour.technician_id(), from, to })
            })
        }))
    }
}
