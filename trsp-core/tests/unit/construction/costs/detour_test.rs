use super::*;
use crate::construction::constraints::{MoveConstraint, TimeWindowConstraint};
use crate::construction::costs::{CostDelegate, DistanceCost, DurationCost, ScheduleCost, WorkingTimeCost};
use crate::models::problem::{RequestBuilder, TechnicianBuilder, create_matrix_transport_cost};
use crate::helpers::models::problem::*;
use crate::helpers::models::solution::*;
use rand::Rng;
use trsp_heuristics::prelude::RandomGen;

fn create_removal(tour: &Tour, position: usize) -> Detour {
    let nodes = tour.nodes();
    Detour::removal(nodes[position - 1], nodes[position], nodes[position + 1])
}

fn create_insertion(tour: &Tour, position: usize, node: NodeId) -> Detour {
    let nodes = tour.nodes();
    Detour::insertion(nodes[position - 1], node, nodes[position])
}

fn add_leg(detour: Detour, other: Detour) -> Detour {
    detour.with_second(other.first.pred, other.first.node, other.first.succ)
}

fn assert_detour(tour: &Tour, detour: &Detour) {
    let mut changed = tour.clone();
    match detour.kind {
        DetourKind::Removal => detour.legs().for_each(|leg| {
            changed.remove_node(leg.node).unwrap();
        }),
        DetourKind::Insertion => detour.legs().for_each(|leg| {
            changed.insert_after(leg.pred, leg.node).unwrap();
        }),
    }

    let costs: [&(dyn CostDelegate + Send + Sync); 3] = [&DistanceCost, &DurationCost, &WorkingTimeCost];
    for cost in costs {
        let expected = cost.evaluate_tour(&changed) - cost.evaluate_tour(tour);
        let actual = cost.evaluate_detour(tour, detour).unwrap();

        assert_close!(actual, expected, "{} with {detour:?} on {}", cost.name(), tour.node_seq_string());
    }
}

parameterized_test! {can_evaluate_detour_as_physical_change, seed, {
    can_evaluate_detour_as_physical_change_impl(seed);
}}

can_evaluate_detour_as_physical_change! {
    case01: 100,
    case02: 101,
    case03: 102,
    case04: 103,
    case05: 104,
    case06: 105,
    case07: 106,
}

fn can_evaluate_detour_as_physical_change_impl(seed: u64) {
    let instance = create_random_instance(seed, 1, 20);
    let mut rng = RandomGen::with_seed(seed);
    let (visited, unvisited) = instance.requests().split_at(12);
    let tour = create_tour(&instance, 0, visited);
    let interior = tour.request_positions();

    for _ in 0..20 {
        let first = rng.gen_range(interior.start..interior.end - 2);
        let second = rng.gen_range(first + 2..interior.end);

        assert_detour(&tour, &create_removal(&tour, first));
        assert_detour(&tour, &add_leg(create_removal(&tour, first), create_removal(&tour, second)));
        assert_detour(&tour, &add_leg(create_removal(&tour, second), create_removal(&tour, first)));

        let node_a = unvisited[rng.gen_range(0..4)];
        let node_b = unvisited[rng.gen_range(4..unvisited.len())];
        let (first, second) = (first, second + 1);

        assert_detour(&tour, &create_insertion(&tour, first, node_a));
        assert_detour(&tour, &add_leg(create_insertion(&tour, first, node_a), create_insertion(&tour, second, node_b)));
        assert_detour(&tour, &add_leg(create_insertion(&tour, second, node_b), create_insertion(&tour, first, node_a)));
    }
}

#[test]
fn can_evaluate_insertion_by_pushing_schedule_forward() {
    let scenario = create_abc_scenario((5., 15.));
    let tour = create_tour(&scenario.instance, 0, &[scenario.a, scenario.c]);
    let insertion = Detour::insertion(scenario.a, scenario.b, scenario.c);

    assert!(tour.push_forward(2, scenario.b).unwrap().is_some());
    assert_eq!(DurationCost.evaluate_detour(&tour, &insertion), Ok(0.));
    assert_eq!(WorkingTimeCost.evaluate_detour(&tour, &insertion), Ok(3.));
    assert_detour(&tour, &insertion);
}

#[test]
fn can_evaluate_insertion_which_shortens_tour() {
    // shortcut through location 2 is faster than a direct trip from home to location 1
    let durations = vec![0., 10., 1., 1., 0., 1., 1., 1., 0.];
    let transport = create_matrix_transport_cost(durations.clone(), durations).unwrap();
    let instance = create_test_instance(
        transport,
        vec![TechnicianBuilder::default().location(0)],
        vec![RequestBuilder::default().location(1), RequestBuilder::default().location(2)],
    );
    let tour = create_tour(&instance, 0, &[2]);
    let insertion = Detour::insertion(0, 3, 2);

    assert!(tour.push_forward(1, 3).unwrap().is_none());
    assert_eq!(DurationCost.evaluate_detour(&tour, &insertion), Ok(-8.));
    assert_detour(&tour, &insertion);
}

#[test]
fn can_convert_detour_to_patch() {
    let instance = create_random_instance(0, 1, 8);
    let requests = instance.requests();
    let tour = create_tour(&instance, 0, &requests[..6]);

    let removal = add_leg(create_removal(&tour, 2), create_removal(&tour, 4));
    assert_eq!(removal.to_patch(&tour), Ok(TourPatch::new(2, 5, [requests[2]])));

    let insertion = add_leg(create_insertion(&tour, 5, requests[7]), create_insertion(&tour, 1, requests[6]));
    assert_eq!(
        insertion.to_patch(&tour),
        Ok(TourPatch::new(1, 5, [requests[6], requests[0], requests[1], requests[2], requests[3], requests[7]]))
    );
}

#[test]
fn can_reject_overlapping_legs() {
    let instance = create_random_instance(0, 1, 8);
    let requests = instance.requests();
    let tour = create_tour(&instance, 0, &requests[..6]);

    let adjacent = add_leg(create_removal(&tour, 2), create_removal(&tour, 3));
    let same = add_leg(create_removal(&tour, 2), create_removal(&tour, 2));
    let same_arc = add_leg(create_insertion(&tour, 2, requests[6]), create_insertion(&tour, 2, requests[7]));
    let same_node = add_leg(create_insertion(&tour, 2, requests[6]), create_insertion(&tour, 4, requests[6]));

    for detour in [adjacent, same, same_arc, same_node] {
        assert!(matches!(detour.validate(&tour), Err(TourError::Precondition(_))), "{detour:?}");
        assert!(matches!(DistanceCost.evaluate_detour(&tour, &detour), Err(TourError::Precondition(_))));
        assert!(matches!(DurationCost.evaluate_detour(&tour, &detour), Err(TourError::Precondition(_))));
    }
}

#[test]
fn can_reject_detour_not_matching_tour() {
    let instance = create_random_instance(0, 1, 8);
    let requests = instance.requests();
    let tour = create_tour(&instance, 0, &requests[..6]);
    let nodes = tour.nodes();

    let not_consecutive = Detour::removal(nodes[1], nodes[3], nodes[4]);
    let no_arc = Detour::insertion(nodes[1], requests[6], nodes[3]);
    let home = Detour::removal(nodes[0], nodes[1], nodes[2]).with_second(nodes[6], nodes[7], nodes[1]);

    assert!(matches!(not_consecutive.validate(&tour), Err(TourError::Precondition(_))));
    assert!(matches!(no_arc.validate(&tour), Err(TourError::Precondition(_))));
    assert!(matches!(home.validate(&tour), Err(TourError::Precondition(_))));
    assert_eq!(Detour::removal(nodes[1], requests[7], nodes[2]).validate(&tour), Err(TourError::NotInTour(requests[7])));
    assert_eq!(Detour::insertion(nodes[1], requests[2], nodes[2]).validate(&tour), Err(TourError::AlreadyInTour(requests[2])));
}

parameterized_test! {can_reinsert_abc_request_only_when_window_is_satisfiable, (b_window, original, expected_delta, is_feasible), {
    can_reinsert_abc_request_only_when_window_is_satisfiable_impl(b_window, original, expected_delta, is_feasible);
}}

can_reinsert_abc_request_only_when_window_is_satisfiable! {
    case01_feasible: ((5., 15.), "ABC", 0., true),
    case02_infeasible: ((0., 3.), "BAC", 1., false),
}

fn can_reinsert_abc_request_only_when_window_is_satisfiable_impl(
    b_window: (f64, f64),
    original: &str,
    expected_delta: f64,
    is_feasible: bool,
) {
    let scenario = create_abc_scenario(b_window);
    let requests = original
        .chars()
        .map(|name| match name {
            'A' => scenario.a,
            'B' => scenario.b,
            _ => scenario.c,
        })
        .collect::<Vec<_>>();
    let cost = ScheduleCost::default();
    let tour = create_tour(&scenario.instance, 0, requests.as_slice());
    assert!(TimeWindowConstraint.is_tour_feasible(&tour));

    let position = tour.position_of(scenario.b).unwrap();
    let removal = create_removal(&tour, position);
    let removal_delta = cost.evaluate_detour(&tour, &removal).unwrap();

    let mut reduced = tour.clone();
    reduced.remove_node(scenario.b).unwrap();
    let insertion = Detour::insertion(scenario.a, scenario.b, scenario.c);
    let insertion_delta = cost.evaluate_detour(&reduced, &insertion).unwrap();

    assert_close!(removal_delta + insertion_delta, expected_delta);

    let mut reinserted = reduced.clone();
    reinserted.insert_after(scenario.a, scenario.b).unwrap();
    assert_eq!(get_requests(&reinserted), vec![scenario.a, scenario.b, scenario.c]);
    assert_eq!(TimeWindowConstraint.is_tour_feasible(&reinserted), is_feasible);
    assert_eq!(cost.evaluate_tour(&reinserted) == cost.evaluate_tour(&tour), is_feasible);
    assert_schedule(&reinserted);
}
