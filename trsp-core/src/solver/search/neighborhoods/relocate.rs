use super::{Neighborhood, is_same_place, is_transferable};
use crate::models::solution::Solution;
use crate::solver::search::MoveKind;

/// Moves one request to another position within its tour or to another tour. Unserved requests
/// are tried at every insertion position.
#[derive(Clone, Debug, Default)]
pub struct Relocate;

impl Neighborhood for Relocate {
    fn name(&self) -> &str {
        "relocate"
    }

    fn candidates<'a>(&'a self, solution: &'a Solution) -> Box<dyn Iterator<Item = MoveKind> + 'a> {
        let tours = solution.tours();

        let relocations = tours.iter().flat_map(move |source| {
            source.request_positions().flat_map(move |from| {
                tours.iter().flat_map(move |target| {
                    let is_same_tour = source.technician_id() == target.technician_id();
                    let is_allowed = is_same_tour || is_transferable(source, from, 1);

                    target
                        .insertion_positions()
                        .filter(move |&to| is_allowed && (!is_same_tour || !is_same_place(from, 1, to)))
                        .map(move |to| MoveKind::Relocate {
                            from_tour: source.technician_id(),
                            from,
                            to_tour: target.technician_id(),
                            to,
                        })
                })
            })
        });

        let insertions = solution.unserved().flat_map(move |node| {
            tours.iter().flat_map(move |tour| {
                tour.insertion_positions().map(move |position| MoveKind::Insert {
                    tour: tour.technician_id(),
                    node,
                    position,
                })
            })
        });

        Box::new(relocations.chain(insertions))
    }
}
