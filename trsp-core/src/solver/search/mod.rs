//! Local search over moves: move model, neighborhoods and variable neighborhood descent.

mod local_search;
pub use self::local_search::*;

mod moves;
pub use self::moves::*;

pub mod neighborhoods;

use crate::construction::constraints::ConstraintHandler;
use crate::construction::costs::CostDelegate;
use crate::models::common::Cost;
use crate::models::solution::{Solution, TourResult};
use crate::solver::search::neighborhoods::Neighborhood;
use serde::Deserialize;
use std::sync::Arc;
use trsp_heuristics::prelude::*;

/// A min cost decrease to accept a move as an improvement.
pub const IMPROVEMENT_TOLERANCE: Cost = 1e-6;

/// Specifies which improving move is accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchStrategy {
    /// Accepts the first improving move.
    #[default]
    FirstImprovement,
    /// Evaluates whole neighborhood and accepts the best improving move.
    BestImprovement,
}

/// Keeps everything needed to evaluate moves. It is shared by parallel workers, the solution is not.
#[derive(Clone)]
pub struct SearchContext {
    /// Cost delegate.
    pub cost: Arc<dyn CostDelegate + Send + Sync>,
    /// Feasibility constraints.
    pub constraints: ConstraintHandler,
    /// Move acceptance strategy.
    pub strategy: SearchStrategy,
    /// Execution environment.
    pub environment: Arc<Environment>,
}

/// Explores the neighborhood of the solution and returns an improving feasible move according to
/// the strategy. The quota is checked between candidates. Structural errors are propagated.
pub fn explore(neighborhood: &dyn Neighborhood, solution: &Solution, context: &SearchContext) -> TourResult<Option<Move>> {
    let mut best: Option<Move> = None;

    for kind in neighborhood.candidates(solution) {
        if context.environment.is_quota_reached() {
            break;
        }

        let mv = Move::new(solution, kind)?;

        if let Some(violation) = context.constraints.violation(solution, &mv) {
            context.environment.log_verbose(&format!("{}: {:?} is rejected by {}", neighborhood.name(), mv.kind(), violation));
            continue;
        }

        let delta = context.cost.evaluate_move(solution, &mv)?;
        if delta > -IMPROVEMENT_TOLERANCE {
            continue;
        }

        let mv = mv.with_delta(delta);
        match context.strategy {
            SearchStrategy::FirstImprovement => return Ok(Some(mv)),
            SearchStrategy::BestImprovement => {
                if best.as_ref().and_then(|best| best.delta()).is_none_or(|best_delta| delta < best_delta) {
                    best = Some(mv);
                }
            }
        }
    }

    Ok(best)
}
