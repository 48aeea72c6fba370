use super::*;
use crate::checker::check_solution;
use crate::construction::constraints::ConstraintHandler;
use crate::construction::costs::{DistanceCost, UnservedPenalty};
use crate::helpers::models::problem::*;
use crate::helpers::models::solution::*;
use crate::helpers::solver::*;
use crate::models::problem::RequestBuilder;
use crate::solver::search::SearchStrategy;
use crate::solver::search::neighborhoods::{Relocate, TwoOpt};

/// Requests are on a line at `x = 1..4`, the tour visits them as `4, 2, 3, 1` with distance 10.
fn create_zigzag_solution() -> Solution {
    let instance = create_line_instance((0..4).map(|_| RequestBuilder::default()).collect());

    create_solution(&instance, &[&[5, 3, 4, 2]])
}

fn create_context(strategy: SearchStrategy) -> SearchContext {
    create_test_context_with(Arc::new(DistanceCost), ConstraintHandler::default(), strategy)
}

fn create_local_search() -> LocalSearch {
    LocalSearch::new(vec![Arc::new(TwoOpt), Arc::new(Relocate)])
}

parameterized_test! {can_reach_local_optimum, (strategy, is_parallel), {
    can_reach_local_optimum_impl(strategy, is_parallel);
}}

can_reach_local_optimum! {
    case01_first_sequential: (SearchStrategy::FirstImprovement, false),
    case02_best_sequential: (SearchStrategy::BestImprovement, false),
    case03_first_parallel: (SearchStrategy::FirstImprovement, true),
    case04_best_parallel: (SearchStrategy::BestImprovement, true),
}

fn can_reach_local_optimum_impl(strategy: SearchStrategy, is_parallel: bool) {
    let context = create_context(strategy);
    let solution = create_zigzag_solution();
    assert_close!(context.cost.evaluate_solution(&solution), 10.);

    let result = create_local_search().with_parallel(is_parallel).run(solution, &context).expect("cannot run search");

    assert_eq!(result.termination, Termination::LocalOptimum);
    assert!(result.iterations > 0);
    assert_close!(result.cost, 8.);
    assert_close!(context.cost.evaluate_solution(&result.solution), result.cost);
    assert_eq!(check_solution(&result.solution, None), Ok(()));
    assert_schedule(result.solution.get_tour(0).unwrap());
}

#[test]
fn can_stop_after_max_iterations() {
    let context = create_context(SearchStrategy::FirstImprovement);

    let result =
        create_local_search().with_max_iterations(Some(1)).run(create_zigzag_solution(), &context).expect("cannot run");

    assert_eq!(result.termination, Termination::Budget);
    assert_eq!(result.iterations, 1);
    assert!(result.cost < 10.);
}

#[test]
fn can_stop_when_quota_is_reached() {
    let environment = Environment::new(
        Arc::new(DefaultRandom::new_repeatable()),
        Some(Arc::new(CheckCountQuota::new(0))),
        Parallelism::default(),
        Arc::new(|_: &str| {}),
        false,
    );
    let context = SearchContext { environment: Arc::new(environment), ..create_context(SearchStrategy::FirstImprovement) };

    let result = create_local_search().run(create_zigzag_solution(), &context).expect("cannot run");

    assert_eq!(result.termination, Termination::Budget);
    assert_eq!(result.iterations, 0);
    assert_close!(result.cost, 10.);
    assert_eq!(get_requests(result.solution.get_tour(0).unwrap()), vec![5, 3, 4, 2]);
}

#[test]
fn can_finish_without_neighborhoods() {
    let context = create_context(SearchStrategy::FirstImprovement);

    let result = LocalSearch::new(vec![]).run(create_zigzag_solution(), &context).expect("cannot run");

    assert_eq!(result.termination, Termination::LocalOptimum);
    assert_eq!(result.iterations, 0);
}

#[test]
fn can_insert_unserved_requests_with_penalty() {
    let instance = create_line_instance((0..4).map(|_| RequestBuilder::default()).collect());
    let context = create_test_context_with(
        Arc::new(UnservedPenalty::new(Arc::new(DistanceCost), 100.)),
        ConstraintHandler::default(),
        SearchStrategy::FirstImprovement,
    );

    let result = create_local_search().run(Solution::new(instance), &context).expect("cannot run");

    assert_eq!(result.termination, Termination::LocalOptimum);
    assert_eq!(result.solution.unserved_count(), 0);
    assert_close!(result.cost, 8.);
}

#[test]
fn can_log_progress() {
    let messages = Arc::new(std::sync::Mutex::new(Vec::<String>::new()));
    let logger = {
        let messages = messages.clone();
        Arc::new(move |msg: &str| messages.lock().unwrap().push(msg.to_string()))
    };
    let environment =
        Environment::new(Arc::new(DefaultRandom::new_repeatable()), None, Parallelism::default(), logger, false);
    let context = SearchContext { environment: Arc::new(environment), ..create_context(SearchStrategy::FirstImprovement) };

    create_local_search().run(create_zigzag_solution(), &context).expect("cannot run");

    let messages = messages.lock().unwrap();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].starts_with("local search started: cost 10.000"));
    assert!(messages[1].starts_with("local search finished: LocalOptimum"));
}
