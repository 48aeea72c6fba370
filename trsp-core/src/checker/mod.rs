//! This module provides functionality to automatically check that given solution is consistent
//! and, optionally, feasible.
//!
//! Cached schedule attributes are checked against a straightforward recalculation which does not
//! use any cache, so the checker is the reference used to validate incremental evaluation.

#[cfg(test)]
#[path = "../../tests/unit/checker/checker_test.rs"]
mod checker_test;

use crate::construction::constraints::ConstraintHandler;
use crate::models::common::NodeId;
use crate::models::problem::NodeKind;
use crate::models::solution::{Solution, Tour, VisitSchedule};
use nohash_hasher::IntSet;
use trsp_heuristics::prelude::GenericError;
use trsp_heuristics::utils::is_close;

/// Checks the solution: tours start and end at technician homes, every request is either visited
/// exactly once or unserved, cached schedules match a full recalculation and, when constraints
/// are given, every tour is feasible. Returns all found issues.
pub fn check_solution(solution: &Solution, constraints: Option<&ConstraintHandler>) -> Result<(), Vec<GenericError>> {
    let errors = solution
        .tours()
        .iter()
        .flat_map(|tour| {
            check_homes(tour)
                .err()
                .into_iter()
                .chain(check_schedule(tour).err())
                .chain(constraints.and_then(|constraints| check_feasibility(tour, constraints).err()))
        })
        .chain(check_assignment(solution).err().into_iter().flatten())
        .collect::<Vec<_>>();

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Recalculates visit schedules of the tour in two plain passes.
pub fn recompute_schedule(tour: &Tour) -> Vec<VisitSchedule> {
    let instance = tour.instance();
    let nodes = tour.nodes();

    let mut visits: Vec<VisitSchedule> = Vec::with_capacity(nodes.len());
    for (position, &id) in nodes.iter().enumerate() {
        let node = instance.node(id);

        let (physical_arrival, load) = match position.checked_sub(1).and_then(|prev| visits.get(prev)) {
            Some(prev) if node.is_depot() => (prev.departure + instance.duration(prev.node, id), node.demand),
            Some(prev) => (prev.departure + instance.duration(prev.node, id), prev.load + node.demand),
            None => (node.time_window.start, node.demand),
        };

        let arrival = physical_arrival.max(node.time_window.start);

        visits.push(VisitSchedule {
            node: id,
            arrival,
            waiting: arrival - physical_arrival,
            departure: arrival + node.service_time,
            lateness: (arrival - node.time_window.end).max(0.),
            latest_arrival: node.time_window.end,
            slack: 0.,
            load,
        });
    }

    for position in (0..visits.len()).rev() {
        if let Some(&next) = visits.get(position + 1).map(|next| &next.latest_arrival) {
            let visit = &visits[position];
            let node = instance.node(visit.node);
            let latest = next - node.service_time - instance.duration(visit.node, visits[position + 1].node);

            visits[position].latest_arrival = node.time_window.end.min(latest);
        }

        visits[position].slack = visits[position].latest_arrival - visits[position].arrival;
    }

    visits
}

fn check_homes(tour: &Tour) -> Result<(), GenericError> {
    if tour.is_empty() {
        return Ok(());
    }

    let technician = tour.technician();
    let instance = tour.instance();

    if tour.first_node().ok() != Some(technician.home) || tour.last_node().ok() != Some(technician.home_end) {
        return Err(format!("tour {} does not start and end at technician home", tour.technician_id()).into());
    }

    let interior = tour.request_positions();
    let is_interior = |id: NodeId| instance.node(id).kind == NodeKind::Request || technician.depot == Some(id);
    if let Some(id) = tour.nodes()[interior].iter().find(|id| !is_interior(**id)) {
        return Err(format!("tour {} visits node {id} which is neither a request nor own depot", tour.technician_id()).into());
    }

    Ok(())
}

fn check_schedule(tour: &Tour) -> Result<(), GenericError> {
    let mismatch = recompute_schedule(tour).into_iter().enumerate().find_map(|(position, expected)| {
        let actual = tour.visit_at(position)?;

        let is_same = actual.node == expected.node
            && is_close(actual.arrival, expected.arrival)
            && is_close(actual.waiting, expected.waiting)
            && is_close(actual.departure, expected.departure)
            && is_close(actual.lateness, expected.lateness)
            && is_close(actual.latest_arrival, expected.latest_arrival)
            && actual.load == expected.load;

        if is_same { None } else { Some(position) }
    });

    match mismatch {
        Some(position) => Err(format!(
            "tour {} has stale schedule at position {position}: {}",
            tour.technician_id(),
            tour.node_seq_string()
        )
        .into()),
        None => Ok(()),
    }
}

fn check_feasibility(tour: &Tour, constraints: &ConstraintHandler) -> Result<(), GenericError> {
    match constraints.tour_violation(tour) {
        Some(name) => Err(format!("tour {} violates '{name}' constraint", tour.technician_id()).into()),
        None => Ok(()),
    }
}

fn check_assignment(solution: &Solution) -> Result<(), Vec<GenericError>> {
    let instance = solution.instance();
    let mut errors: Vec<GenericError> = vec![];
    let mut visited = IntSet::default();

    for tour in solution.tours() {
        for id in tour.requests() {
            if !visited.insert(id) {
                errors.push(format!("request {id} is visited more than once").into());
            }

            if solution.is_unserved(id) {
                errors.push(format!("request {id} is both visited and unserved").into());
            }
        }
    }

    solution.unserved().filter(|id| !instance.is_request(*id)).for_each(|id| {
        errors.push(format!("node {id} is marked as unserved, but it is not a request").into());
    });

    instance.requests().iter().filter(|id| !visited.contains(*id) && !solution.is_unserved(**id)).for_each(|id| {
        errors.push(format!("request {id} is neither visited nor unserved").into());
    });

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
