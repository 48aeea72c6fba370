use super::{Neighborhood, is_transferable, segment_starts};
use crate::models::solution::{Solution, Tour};
use crate::solver::search::MoveKind;

/// Exchanges two segments of equal or different length between two tours.
#[derive(Clone, Debug)]
pub struct StringExchange {
    max_length: usize,
}

impl StringExchange {
    /// Creates a new instance of `StringExchange` with max segment length.
    pub fn new(max_length: usize) -> Self {
        Self { max_length: max_length.max(1) }
    }
}

impl Default for StringExchange {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Neighborhood for StringExchange {
    fn name(&self) -> &str {
        "string-exchange"
    }

    fn candidates<'a>(&'a self, solution: &'a Solution) -> Box<dyn Iterator<Item = MoveKind> + 'a> {
        let tours = solution.tours();
        let max_length = self.max_length;

        Box::new(tours.iter().enumerate().flat_map(move |(idx, first)| {
            tours[idx + 1..].iter().flat_map(move |second| {
                (1..=max_length).flat_map(move |first_length| {
                    transferable_starts(first, first_length).flat_map(move |first_start| {
                        (1..=max_length).flat_map(move |second_length| {
                            transferable_starts(second, second_length).map(move |second_start| {
                                MoveKind::StringExchange {
                                    first_tour: first.technician_id(),
                                    first_start,
                                    first_length,
                                    second_tour: second.technician_id(),
                                    second_start,
                                    second_length,
                                }
                            })
                        })
                    })
                })
            })
        }))
    }
}

fn transferable_starts(tour: &Tour, length: usize) -> impl Iterator<Item = usize> + '_ {
    segment_starts(tour, length).filter(move |&start| is_transferable(tour, start, length))
}
