use super::Construction;
use crate::models::common::{Cost, NodeId};
use crate::models::problem::Technician;
use crate::models::solution::{Solution, Tour, TourResult};
use crate::solver::search::SearchContext;
use rayon::slice::ParallelSliceMut;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use trsp_heuristics::prelude::compare_floats;
use trsp_heuristics::utils::parallel_collect;

/// A randomized Clarke and Wright savings heuristic. For every technician with an empty tour, it
/// starts from one route per compatible unserved request and merges route ends in order of their
/// savings while the merged route stays feasible. The best route is assigned to the technician.
///
/// With `k_max` greater than one, a merge is picked randomly among `k_max` best remaining arcs.
#[derive(Clone, Debug)]
pub struct ClarkeWright {
    k_max: usize,
}

impl ClarkeWright {
    /// Creates a new instance of `ClarkeWright`.
    pub fn new(k_max: usize) -> Self {
        Self { k_max: k_max.max(1) }
    }
}

impl Default for ClarkeWright {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Construction for ClarkeWright {
    fn name(&self) -> &str {
        "clarke-wright"
    }

    fn construct(&self, solution: Solution, context: &SearchContext) -> TourResult<Solution> {
        let mut solution = solution;
        let instance = solution.instance().clone();

        for technician in instance.technicians() {
            if context.environment.is_quota_reached() {
                break;
            }

            if !solution.get_tour(technician.id)?.has_no_requests() {
                continue;
            }

            let requests = solution.unserved().filter(|id| technician.can_serve(instance.node(*id))).collect::<Vec<_>>();

            if let Some(route) = self.build_route(&solution, technician, requests.as_slice(), context)? {
                if needs_depot(&solution, technician, route.as_slice()) {
                    solution.insert_depot(technician.id, 1)?;
                    solution.insert_requests(technician.id, 2, route.as_slice())?;
                } else {
                    solution.insert_requests(technician.id, 1, route.as_slice())?;
                }
            }
        }

        Ok(solution)
    }
}

/// A saving of serving `from` and `to` consecutively instead of using two separate tours.
struct Saving {
    from: NodeId,
    to: NodeId,
    value: Cost,
}

impl ClarkeWright {
    fn build_route(
        &self,
        solution: &Solution,
        technician: &Technician,
        requests: &[NodeId],
        context: &SearchContext,
    ) -> TourResult<Option<Vec<NodeId>>> {
        let mut savings = create_savings(solution, technician, requests);

        let mut routes = requests.iter().map(|id| vec![*id]).collect::<Vec<_>>();
        let mut route_of = requests.iter().enumerate().map(|(idx, id)| (*id, idx)).collect::<FxHashMap<_, _>>();
        let mut feasible = routes
            .iter()
            .map(|route| create_tour(solution, technician, route).map(|tour| context.constraints.is_tour_feasible(&tour)))
            .collect::<TourResult<Vec<_>>>()?;

        while let Some(saving) = self.pop_saving(&mut savings, context) {
            let (Some(&first), Some(&second)) = (route_of.get(&saving.from), route_of.get(&saving.to)) else {
                continue;
            };

            let can_merge = first != second
                && feasible[first]
                && feasible[second]
                && routes[first].last() == Some(&saving.from)
                && routes[second].first() == Some(&saving.to);

            if !can_merge {
                continue;
            }

            let merged = routes[first].iter().chain(routes[second].iter()).copied().collect::<Vec<_>>();
            if !context.constraints.is_tour_feasible(&create_tour(solution, technician, merged.as_slice())?) {
                continue;
            }

            routes[second].iter().for_each(|id| {
                route_of.insert(*id, first);
            });
            routes[first] = merged;
            routes[second].clear();
            feasible[second] = false;
        }

        let candidates = routes
            .into_iter()
            .zip(feasible)
            .filter(|(route, is_feasible)| *is_feasible && !route.is_empty())
            .map(|(route, _)| {
                let cost = context.cost.evaluate_tour(&create_tour(solution, technician, route.as_slice())?);
                Ok((route, cost))
            })
            .collect::<TourResult<Vec<_>>>()?;

        Ok(candidates
            .into_iter()
            .max_by(|(a_route, a_cost), (b_route, b_cost)| {
                a_route.len().cmp(&b_route.len()).then_with(|| compare_floats(*b_cost, *a_cost))
            })
            .map(|(route, _)| route))
    }

    /// Removes one of `k_max` best savings. Savings are sorted in ascending order, so the best
    /// ones are at the end.
    fn pop_saving(&self, savings: &mut Vec<Saving>, context: &SearchContext) -> Option<Saving> {
        if savings.is_empty() {
            return None;
        }

        let k = self.k_max.min(savings.len());
        let offset = if k > 1 { context.environment.random.uniform_int(0, k as i32 - 1) as usize } else { 0 };

        Some(savings.remove(savings.len() - 1 - offset))
    }
}

fn create_savings(solution: &Solution, technician: &Technician, requests: &[NodeId]) -> Vec<Saving> {
    let instance = solution.instance();
    let home = technician.home;

    let mut savings = parallel_collect(requests, |&from| {
        requests
            .iter()
            .filter(|&&to| to != from)
            .map(|&to| Saving {
                from,
                to,
                value: instance.distance(home, from) + instance.distance(to, home) - instance.distance(from, to),
            })
            .collect::<Vec<_>>()
    })
    .into_iter()
    .flatten()
    .collect::<Vec<_>>();

    savings.par_sort_by(|a, b| match compare_floats(a.value, b.value) {
        Ordering::Equal => (b.from, b.to).cmp(&(a.from, a.to)),
        other => other,
    });

    savings
}

/// Creates a tour which serves the route. The main depot is visited first when the route
/// requires tools the technician does not carry.
fn create_tour(solution: &Solution, technician: &Technician, route: &[NodeId]) -> TourResult<Tour> {
    let mut tour = Tour::create(solution.instance().clone(), technician.id, true);
    tour.insert_nodes(1, route)?;

    if let Some(depot) = technician.depot.filter(|_| needs_depot(solution, technician, route)) {
        tour.insert_at(1, depot)?;
    }

    Ok(tour)
}

fn needs_depot(solution: &Solution, technician: &Technician, route: &[NodeId]) -> bool {
    technician.depot.is_some() && route.iter().any(|id| !technician.has_tools(solution.instance().node(*id)))
}
