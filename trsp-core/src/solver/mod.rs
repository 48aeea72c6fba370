//! The solver module contains local search over moves and the glue which creates a solver from
//! configuration.
//!
//! A solver runs in two phases: a construction heuristic assigns unserved requests, then local
//! search improves the solution till a local optimum or the budget is reached.

#[cfg(test)]
#[path = "../../tests/unit/solver/solver_test.rs"]
mod solver_test;

pub mod config;
pub mod registry;
pub mod search;

use crate::construction::heuristics::Construction;
use crate::models::problem::Instance;
use crate::models::solution::Solution;
use crate::solver::search::{LocalSearch, SearchContext, SearchResult};
use std::sync::Arc;
use trsp_heuristics::prelude::*;

/// Solves a technician routing problem instance.
pub struct Solver {
    instance: Arc<Instance>,
    context: SearchContext,
    construction: Arc<dyn Construction + Send + Sync>,
    local_search: LocalSearch,
}

impl Solver {
    /// Creates a new instance of `Solver`.
    pub fn new(
        instance: Arc<Instance>,
        context: SearchContext,
        construction: Arc<dyn Construction + Send + Sync>,
        local_search: LocalSearch,
    ) -> Self {
        Self { instance, context, construction, local_search }
    }

    /// Returns search context.
    pub fn context(&self) -> &SearchContext {
        &self.context
    }

    /// Solves the problem starting from a solution where all requests are unserved.
    pub fn solve(&self) -> GenericResult<SearchResult> {
        self.solve_from(Solution::new(self.instance.clone()))
    }

    /// Solves the problem starting from given solution. Pinned nodes of the solution are kept.
    pub fn solve_from(&self, solution: Solution) -> GenericResult<SearchResult> {
        let logger = self.context.environment.logger.as_ref();

        let (solution, duration) = Timer::measure_duration(|| self.construction.construct(solution, &self.context));
        let solution = solution?;

        logger(&format!(
            "{} built initial solution in {}ms: unserved {}",
            self.construction.name(),
            duration.as_millis(),
            solution.unserved_count()
        ));

        Ok(self.local_search.run(solution, &self.context)?)
    }
}
