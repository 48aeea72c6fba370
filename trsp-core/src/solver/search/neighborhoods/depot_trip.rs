use super::Neighborhood;
use crate::models::solution::Solution;
use crate::solver::search::MoveKind;

/// Adds or drops visits of the main depot: an unserved request is tried together with a depot
/// visit in front of it in tours without one, an existing depot visit is tried to be removed.
#[derive(Clone, Debug, Default)]
pub struct DepotTrip;

impl Neighborhood for DepotTrip {
    fn name(&self) -> &str {
        "depot-trip"
    }

    fn candidates<'a>(&'a self, solution: &'a Solution) -> Box<dyn Iterator<Item = MoveKind> + 'a> {
        let tours = solution.tours();

        let removals = tours.iter().filter_map(|tour| {
            tour.depot_position().map(|position| MoveKind::Remove { tour: tour.technician_id(), position })
        });

        let insertions = solution.unserved().flat_map(move |node| {
            tours.iter().filter(|tour| tour.technician().depot.is_some() && !tour.is_depot_visited()).flat_map(
                move |tour| {
                    tour.insertion_positions().map(move |position| MoveKind::InsertWithDepot {
                        tour: tour.technician_id(),
                        node,
                        position,
                    })
                },
            )
        });

        Box::new(removals.chain(insertions))
    }
}
