use super::Construction;
use crate::models::common::Cost;
use crate::models::solution::{Solution, TourResult};
use crate::solver::search::{Move, MoveKind, SearchContext};
use trsp_heuristics::prelude::compare_floats;

/// Repeatedly inserts the unserved request with the cheapest feasible insertion over all tours
/// and positions till no request can be inserted. A request which needs tools the technician
/// does not carry is also tried together with a main depot visit in front of it.
#[derive(Clone, Debug, Default)]
pub struct CheapestInsertion;

impl Construction for CheapestInsertion {
    fn name(&self) -> &str {
        "cheapest-insertion"
    }

    fn construct(&self, solution: Solution, context: &SearchContext) -> TourResult<Solution> {
        let mut solution = solution;

        while !context.environment.is_quota_reached() {
            let Some(mv) = find_cheapest(&solution, context)? else { break };

            solution.apply_move(&mv)?;
        }

        Ok(solution)
    }
}

fn find_cheapest(solution: &Solution, context: &SearchContext) -> TourResult<Option<Move>> {
    let mut best: Option<(Cost, Move)> = None;

    for node in solution.unserved() {
        for tour in solution.tours() {
            let technician = tour.technician();
            let needs_depot = technician.depot.is_some()
                && !tour.is_depot_visited()
                && !technician.has_tools(solution.instance().node(node));

            for position in tour.insertion_positions() {
                let tour_id = tour.technician_id();
                let kinds = std::iter::once(MoveKind::Insert { tour: tour_id, node, position })
                    .chain(needs_depot.then_some(MoveKind::InsertWithDepot { tour: tour_id, node, position }));

                for kind in kinds {
                    let mv = Move::new(solution, kind)?;

                    if !context.constraints.is_feasible(solution, &mv) {
                        continue;
                    }

                    let delta = context.cost.evaluate_move(solution, &mv)?;
                    if best.as_ref().is_none_or(|(best_delta, _)| compare_floats(delta, *best_delta).is_lt()) {
                        best = Some((delta, mv));
                    }
                }
            }
        }
    }

    Ok(best.map(|(delta, mv)| mv.with_delta(delta)))
}
