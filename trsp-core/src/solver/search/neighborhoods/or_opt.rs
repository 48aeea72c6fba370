use super::{Neighborhood, is_same_place, is_transferable, segment_starts};
use crate::models::solution::Solution;
use crate::solver::search::MoveKind;

/// Moves a segment of two or more consecutive requests to another position of the same or
/// another tour keeping its orientation.
#[derive(Clone, Debug)]
pub struct OrOpt {
    max_length: usize,
}

impl OrOpt {
    /// Creates a new instance of `OrOpt` with max segment length.
    pub fn new(max_length: usize) -> Self {
        Self { max_length: max_length.max(2) }
    }
}

impl Default for OrOpt {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Neighborhood for OrOpt {
    fn name(&self) -> &str {
        "or-opt"
    }

    fn candidates<'a>(&'a self, solution: &'a Solution) -> Box<dyn Iterator<Item = MoveKind> + 'a> {
        let tours = solution.tours();

        Box::new(tours.iter().flat_map(move |source| {
            (2..=self.max_length).flat_map(move |length| {
                segment_starts(source, length).flat_map(move |start| {
                    tours.iter().flat_map(move |target| {
                        let is_same_tour = source.technician_id() == target.technician_id();
                        let is_allowed = is_same_tour || is_transferable(source, start, length);

                        target
                            .insertion_positions()
                            .filter(move |&to| is_allowed && (!is_same_tour || !is_same_place(start, length, to)))
                            .map(move |to| MoveKind::OrOpt {
                                from_tour: source.technician_id(),
                                start,
                                length,
                                to_tour: target.technician_id(),
                                to,
                            })
                    })
                })
            })
        }))
    }
}
