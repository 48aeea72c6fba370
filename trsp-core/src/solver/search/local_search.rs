#[cfg(test)]
#[path = "../../../tests/unit/solver/search/local_search_test.rs"]
mod local_search_test;

use super::neighborhoods::Neighborhood;
use super::{Move, SearchContext, explore};
use crate::models::common::Cost;
use crate::models::solution::{Solution, TourResult};
use std::sync::Arc;
use trsp_heuristics::prelude::*;
use trsp_heuristics::utils::parallel_into_collect;

/// Specifies why local search has stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// No neighborhood yields an improving feasible move.
    LocalOptimum,
    /// Time quota or max iterations is reached.
    Budget,
}

/// A local search result.
#[derive(Debug)]
pub struct SearchResult {
    /// The best found solution.
    pub solution: Solution,
    /// Solution cost.
    pub cost: Cost,
    /// Amount of applied moves.
    pub iterations: usize,
    /// Termination reason.
    pub termination: Termination,
}

/// Implements variable neighborhood descent: neighborhoods are explored in order and the search
/// returns to the first one after every applied move. In parallel mode, all neighborhoods are
/// explored at once on solution copies and the best found move is applied.
pub struct LocalSearch {
    neighborhoods: Vec<Arc<dyn Neighborhood + Send + Sync>>,
    max_iterations: Option<usize>,
    is_parallel: bool,
}

impl LocalSearch {
    /// Creates a new instance of `LocalSearch`.
    pub fn new(neighborhoods: Vec<Arc<dyn Neighborhood + Send + Sync>>) -> Self {
        Self { neighborhoods, max_iterations: None, is_parallel: false }
    }

    /// Sets max amount of applied moves.
    pub fn with_max_iterations(mut self, max_iterations: Option<usize>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Enables exploring neighborhoods in parallel.
    pub fn with_parallel(mut self, is_parallel: bool) -> Self {
        self.is_parallel = is_parallel;
        self
    }

    /// Improves the solution till local optimum or budget is reached.
    pub fn run(&self, solution: Solution, context: &SearchContext) -> TourResult<SearchResult> {
        let environment = context.environment.as_ref();
        let logger = environment.logger.as_ref();
        let timer = Timer::start();

        let mut solution = solution;
        let mut iterations = 0;
        let mut index = 0;

        logger(&format!(
            "local search started: cost {:.3}, unserved {}, neighborhoods: {}",
            context.cost.evaluate_solution(&solution),
            solution.unserved_count(),
            self.neighborhoods.iter().map(|neighborhood| neighborhood.name()).collect::<Vec<_>>().join(",")
        ));

        let termination = loop {
            if self.is_budget_reached(environment, iterations) {
                break Termination::Budget;
            }

            let found = if self.is_parallel {
                self.explore_parallel(&solution, context)?
            } else {
                let Some(neighborhood) = self.neighborhoods.get(index) else {
                    break self.exhausted(environment);
                };

                explore(neighborhood.as_ref(), &solution, context)?
            };

            match found {
                Some(mv) => {
                    solution.apply_move(&mv)?;
                    iterations += 1;
                    index = 0;

                    environment.log_verbose(&format!("applied {:?} with delta {:.3}", mv.kind(), mv.delta().unwrap_or_default()));
                }
                None if self.is_parallel => break self.exhausted(environment),
                None => index += 1,
            }
        };

        let cost = context.cost.evaluate_solution(&solution);
        logger(&format!(
            "local search finished: {termination:?} after {iterations} moves in {:.3}s, cost {cost:.3}, unserved {}",
            timer.elapsed_secs_as_float(),
            solution.unserved_count()
        ));

        Ok(SearchResult { solution, cost, iterations, termination })
    }

    fn explore_parallel(&self, solution: &Solution, context: &SearchContext) -> TourResult<Option<Move>> {
        let workers = self.neighborhoods.iter().map(|neighborhood| (neighborhood.clone(), solution.clone())).collect::<Vec<_>>();

        let results = context.environment.parallelism.thread_pool_execute(|| {
            parallel_into_collect(workers, |(neighborhood, solution)| explore(neighborhood.as_ref(), &solution, context))
        });

        let moves = results.into_iter().collect::<TourResult<Vec<_>>>()?;

        Ok(moves
            .into_iter()
            .flatten()
            .min_by(|a, b| compare_floats(a.delta().unwrap_or_default(), b.delta().unwrap_or_default())))
    }

    fn is_budget_reached(&self, environment: &Environment, iterations: usize) -> bool {
        environment.is_quota_reached() || self.max_iterations.is_some_and(|max| iterations >= max)
    }

    /// No move is found: exploration could be cut by the quota.
    fn exhausted(&self, environment: &Environment) -> Termination {
        if environment.is_quota_reached() { Termination::Budget } else { Termination::LocalOptimum }
    }
}
