use super::*;
use crate::helpers::models::problem::*;
use crate::helpers::models::solution::*;
use crate::models::problem::{DepotBuilder, RequestBuilder, TechnicianBuilder};
use crate::solver::search::Move;
use std::sync::Arc;

fn create_single_tour_solution(tour: &[usize], requests: usize) -> Solution {
    let instance = create_line_instance((0..requests).map(|_| RequestBuilder::default()).collect());

    create_solution(&instance, &[tour])
}

/// Tours are `<0,4,5,6,1>` and `<2,7,8,3>`.
fn create_two_tours_solution() -> Solution {
    let instance = create_test_instance(
        create_unit_transport(6),
        vec![TechnicianBuilder::default(), TechnicianBuilder::default()],
        (1..=5).map(|location| RequestBuilder::default().location(location)).collect(),
    );

    create_solution(&instance, &[&[4, 5, 6], &[7, 8]])
}

fn get_neighborhoods() -> Vec<Arc<dyn Neighborhood + Send + Sync>> {
    vec![
        Arc::new(Relocate),
        Arc::new(Swap),
        Arc::new(TwoOpt),
        Arc::new(OrOpt::default()),
        Arc::new(StringExchange::default()),
        Arc::new(DepotTrip),
    ]
}

parameterized_test! {can_enumerate_candidates_in_single_tour, (neighborhood, expected), {
    can_enumerate_candidates_in_single_tour_impl(neighborhood, expected);
}}

can_enumerate_candidates_in_single_tour! {
    case01_relocate: (Arc::new(Relocate), 6),
    case02_swap: (Arc::new(Swap), 3),
    case03_two_opt: (Arc::new(TwoOpt), 3),
    case04_or_opt: (Arc::new(OrOpt::default()), 2),
    case05_or_opt_short: (Arc::new(OrOpt::new(1)), 2),
    case06_string_exchange: (Arc::new(StringExchange::default()), 0),
}

fn can_enumerate_candidates_in_single_tour_impl(neighborhood: Arc<dyn Neighborhood + Send + Sync>, expected: usize) {
    let solution = create_single_tour_solution(&[2, 3, 4], 3);

    let candidates = neighborhood.candidates(&solution).collect::<Vec<_>>();

    assert_eq!(candidates.len(), expected, "{}: {candidates:?}", neighborhood.name());
}

#[test]
fn can_enumerate_insertions_of_unserved() {
    let solution = create_single_tour_solution(&[2, 3], 3);

    let candidates = Relocate.candidates(&solution).collect::<Vec<_>>();

    assert_eq!(candidates.len(), 5);
    assert_eq!(
        candidates.iter().filter(|kind| matches!(kind, MoveKind::Insert { node: 4, .. })).count(),
        3,
        "{candidates:?}"
    );
}

#[test]
fn can_enumerate_candidates_between_tours() {
    let solution = create_two_tours_solution();

    assert_eq!(Swap.candidates(&solution).count(), 10);
    assert_eq!(StringExchange::default().candidates(&solution).count(), 15);
    assert_eq!(StringExchange::new(1).candidates(&solution).count(), 6);
    assert_eq!(TwoOpt.candidates(&solution).count(), 4);
}

/// Tours are `<0,4,8,5,1>` and `<2,6,3>` where 8 is the depot of the first technician, request 7
/// is unserved.
fn create_depot_solution() -> Solution {
    let instance = create_test_instance_with_depot(
        create_unit_transport(6),
        vec![TechnicianBuilder::default(), TechnicianBuilder::default()],
        (1..=4).map(|location| RequestBuilder::default().location(location)).collect(),
        DepotBuilder::default().location(5),
    );

    let mut solution = create_solution(&instance, &[&[4, 5], &[6]]);
    solution.insert_depot(0, 2).unwrap();

    solution
}

#[test]
fn can_enumerate_depot_trips() {
    let solution = create_depot_solution();

    let candidates = DepotTrip.candidates(&solution).collect::<Vec<_>>();

    assert_eq!(
        candidates,
        vec![
            MoveKind::Remove { tour: 0, position: 2 },
            MoveKind::InsertWithDepot { tour: 1, node: 7, position: 1 },
            MoveKind::InsertWithDepot { tour: 1, node: 7, position: 2 },
        ]
    );
}

#[test]
fn can_keep_depot_out_of_other_tours() {
    let solution = create_depot_solution();
    let depot_leaves_tour = |kind: &MoveKind| match *kind {
        MoveKind::Relocate { from_tour, from, to_tour, .. } => from_tour != to_tour && from_tour == 0 && from == 2,
        MoveKind::Swap { first_tour, first, second_tour, .. } => first_tour != second_tour && first == 2,
        MoveKind::OrOpt { from_tour, start, length, to_tour, .. } => {
            from_tour != to_tour && from_tour == 0 && (start..start + length).contains(&2)
        }
        MoveKind::StringExchange { first_start, first_length, .. } => (first_start..first_start + first_length).contains(&2),
        _ => false,
    };

    for neighborhood in get_neighborhoods() {
        let candidates = neighborhood.candidates(&solution).collect::<Vec<_>>();

        assert!(!candidates.is_empty(), "{}", neighborhood.name());
        assert!(!candidates.iter().any(depot_leaves_tour), "{}: {candidates:?}", neighborhood.name());
        candidates.into_iter().for_each(|kind| {
            let mv = Move::new(&solution, kind);
            assert!(mv.is_ok(), "{}: {mv:?}", neighborhood.name());
        });
    }
}

#[test]
fn can_enumerate_nothing_for_empty_tours() {
    let instance = create_line_instance((0..3).map(|_| RequestBuilder::default()).collect());
    let solution = Solution::new(instance);

    get_neighborhoods().iter().filter(|neighborhood| neighborhood.name() != "relocate").for_each(|neighborhood| {
        assert_eq!(neighborhood.candidates(&solution).count(), 0, "{}", neighborhood.name());
    });
    assert_eq!(Relocate.candidates(&solution).count(), 3);
}

#[test]
fn can_create_valid_moves_from_all_candidates() {
    let solutions = [create_two_tours_solution(), create_single_tour_solution(&[4, 2, 5, 3], 5)];

    for solution in solutions.iter() {
        for neighborhood in get_neighborhoods() {
            for kind in neighborhood.candidates(solution) {
                let mv = Move::new(solution, kind);

                assert!(mv.is_ok(), "{}: {mv:?}", neighborhood.name());
            }
        }
    }
}

#[test]
fn can_return_names() {
    let names = get_neighborhoods().iter().map(|neighborhood| neighborhood.name().to_string()).collect::<Vec<_>>();

    assert_eq!(names, vec!["relocate", "swap", "two-opt", "or-opt", "string-exchange", "depot-trip"]);
}
