#[cfg(test)]
#[path = "../../../tests/unit/models/solution/solution_test.rs"]
mod solution_test;

use super::{Tour, TourError, TourResult};
use crate::construction::costs::CostDelegate;
use crate::models::common::{Cost, NodeId, TechnicianId};
use crate::models::problem::Instance;
use crate::solver::search::{Move, MoveKind};
use nohash_hasher::IntSet;
use std::collections::BTreeSet;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A solution: one tour per technician and the set of unserved requests. Every request is either
/// in exactly one tour or unserved.
#[derive(Clone)]
pub struct Solution {
    instance: Arc<Instance>,
    tours: Vec<Tour>,
    unserved: BTreeSet<NodeId>,
    pinned: IntSet<NodeId>,
}

impl Solution {
    /// Creates a solution where all tours contain only homes and all requests are unserved.
    pub fn new(instance: Arc<Instance>) -> Self {
        let tours = (0..instance.technicians().len())
            .map(|technician| Tour::create(instance.clone(), technician, true))
            .collect();
        let unserved = instance.requests().iter().copied().collect();

        Self { instance, tours, unserved, pinned: IntSet::default() }
    }

    /// Returns problem instance.
    pub fn instance(&self) -> &Arc<Instance> {
        &self.instance
    }

    /// Returns all tours ordered by technician id.
    pub fn tours(&self) -> &[Tour] {
        self.tours.as_slice()
    }

    /// Returns tour of the technician.
    pub fn get_tour(&self, technician: TechnicianId) -> TourResult<&Tour> {
        self.tours.get(technician).ok_or_else(|| TourError::precondition(format!("unknown tour {technician}")))
    }

    /// Returns technician id of the tour which visits the node.
    pub fn tour_of(&self, id: NodeId) -> Option<TechnicianId> {
        self.tours.iter().position(|tour| tour.contains(id))
    }

    /// Returns unserved requests in ascending id order.
    pub fn unserved(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.unserved.iter().copied()
    }

    /// Returns amount of unserved requests.
    pub fn unserved_count(&self) -> usize {
        self.unserved.len()
    }

    /// Checks whether request is unserved.
    pub fn is_unserved(&self, id: NodeId) -> bool {
        self.unserved.contains(&id)
    }

    /// Pins a node: it cannot be moved or removed by local search.
    pub fn pin(&mut self, id: NodeId) {
        self.pinned.insert(id);
    }

    /// Unpins a node.
    pub fn unpin(&mut self, id: NodeId) {
        self.pinned.remove(&id);
    }

    /// Checks whether node is pinned.
    pub fn is_pinned(&self, id: NodeId) -> bool {
        self.pinned.contains(&id)
    }

    /// Inserts unserved request into the tour at given position.
    pub fn insert_request(&mut self, technician: TechnicianId, position: usize, id: NodeId) -> TourResult<()> {
        self.insert_requests(technician, position, &[id])
    }

    /// Inserts unserved requests into the tour at given position keeping their order.
    pub fn insert_requests(&mut self, technician: TechnicianId, position: usize, ids: &[NodeId]) -> TourResult<()> {
        if let Some(id) = ids.iter().find(|id| !self.unserved.contains(id)) {
            return Err(TourError::precondition(format!("request {id} is not unserved")));
        }

        self.get_tour(technician)?;
        self.tours[technician].insert_nodes(position, ids)?;
        ids.iter().for_each(|id| {
            self.unserved.remove(id);
        });

        Ok(())
    }

    /// Inserts a visit of the technician depot into its tour at given position.
    pub fn insert_depot(&mut self, technician: TechnicianId, position: usize) -> TourResult<()> {
        let depot = self
            .get_tour(technician)?
            .technician()
            .depot
            .ok_or_else(|| TourError::precondition(format!("technician {technician} has no depot")))?;

        self.tours[technician].insert_at(position, depot)
    }

    /// Removes request from its tour and marks it as unserved.
    pub fn remove_request(&mut self, id: NodeId) -> TourResult<()> {
        if !self.instance.is_request(id) {
            return Err(TourError::precondition(format!("node {id} is not a request")));
        }

        let technician = self.tour_of(id).ok_or(TourError::NotInTour(id))?;
        let position = self.tours[technician].position_of(id)?;

        self.tours[technician].remove_at(position)?;
        self.unserved.insert(id);

        Ok(())
    }

    /// Applies the move. All its tour patches are validated before any tour is changed, so a
    /// failed move leaves the solution untouched.
    pub fn apply_move(&mut self, mv: &Move) -> TourResult<()> {
        if let MoveKind::Insert { node, .. } | MoveKind::InsertWithDepot { node, .. } = mv.kind() {
            if !self.unserved.contains(node) {
                return Err(TourError::precondition(format!("request {node} is not unserved")));
            }
        }

        for change in mv.changes() {
            let tour = self.get_tour(change.tour)?;

            if tour.version() != change.version {
                return Err(TourError::ConcurrentModification);
            }

            tour.validate_patch(&change.patch)?;
        }

        for change in mv.changes() {
            self.tours[change.tour].apply_patch(&change.patch)?;
        }

        match mv.kind() {
            MoveKind::Insert { node, .. } | MoveKind::InsertWithDepot { node, .. } => {
                self.unserved.remove(node);
            }
            MoveKind::Remove { .. } => {
                let instance = &self.instance;
                self.unserved.extend(mv.moved_nodes().iter().copied().filter(|id| instance.is_request(*id)));
            }
            _ => {}
        }

        Ok(())
    }

    /// Attaches cost delegate to every tour.
    pub fn attach_cost_delegate(&mut self, cost: Arc<dyn CostDelegate + Send + Sync>) {
        self.tours.iter_mut().for_each(|tour| tour.attach_cost_delegate(cost.clone()));
    }

    /// Returns sum of tour costs.
    pub fn total_cost(&self) -> Cost {
        self.tours.iter().map(|tour| tour.total_cost()).sum()
    }
}

impl Debug for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solution").field("tours", &self.tours).field("unserved", &self.unserved).finish_non_exhaustive()
    }
}
