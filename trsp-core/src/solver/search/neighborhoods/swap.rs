use super::{Neighborhood, is_transferable};
use crate::models::solution::Solution;
use crate::solver::search::MoveKind;

/// Exchanges two requests within one tour or between two tours.
#[derive(Clone, Debug, Default)]
pub struct Swap;

impl Neighborhood for Swap {
    fn name(&self) -> &str {
        "swap"
    }

    fn candidates<'a>(&'a self, solution: &'a Solution) -> Box<dyn Iterator<Item = MoveKind> + 'a> {
        let tours = solution.tours();

        Box::new(tours.iter().enumerate().flat_map(move |(first_idx, first_tour)| {
            first_tour.request_positions().flat_map(move |first| {
                tours[first_idx..].iter().flat_map(move |second_tour| {
                    let is_same_tour = first_tour.technician_id() == second_tour.technician_id();

                    second_tour
                        .request_positions()
                        .filter(move |&second| {
                            if is_same_tour {
                                second > first
                            } else {
                                is_transferable(first_tour, first, 1) && is_transferable(second_tour, second, 1)
                            }
                        })
                        .map(move |second| MoveKind::Swap {
                            first_tour: first_tour.technician_id(),
                            first,
                            second_tour: second_tour.technician_id(),
                            second,
                        })
                })
            })
        }))
    }
}
