#[cfg(test)]
#[path = "../../../tests/unit/models/solution/tour_test.rs"]
mod tour_test;

use super::schedule::{BackwardState, ForwardState, ScheduleCache};
use super::{ScheduleSummary, ScheduleTiming, TourError, TourPatch, TourResult, VisitSchedule};
use crate::construction::costs::CostDelegate;
use crate::models::common::{Cost, Demand, Distance, Duration, NodeId, TechnicianId, Timestamp};
use crate::models::problem::{Instance, NodeKind, Technician};
use nohash_hasher::IntSet;
use std::cell::RefCell;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Range;
use std::sync::Arc;

/// Represents a tour: an ordered sequence of nodes visited by one technician. It starts at the
/// technician home and ends at the technician home end.
///
/// Schedule attributes are cached per position and refreshed lazily: a mutation only moves two
/// validity markers and the next read refreshes exactly the stale positions it depends on.
/// Interior mutability of the cache makes the tour `!Sync`: parallel workers own their clones.
#[derive(Clone)]
pub struct Tour {
    instance: Arc<Instance>,
    technician: TechnicianId,
    nodes: Vec<NodeId>,
    /// Maps node id to its position in the tour.
    positions: Vec<Option<usize>>,
    cache: RefCell<ScheduleCache>,
    /// Modification counter used by cursors.
    version: usize,
    cost: Option<Arc<dyn CostDelegate + Send + Sync>>,
}

impl Tour {
    /// Creates an empty tour for given technician.
    pub fn new(instance: Arc<Instance>, technician: TechnicianId) -> TourResult<Self> {
        if instance.technician(technician).is_none() {
            return Err(TourError::precondition(format!("unknown technician {technician}")));
        }

        Ok(Self::create(instance, technician, false))
    }

    /// Creates a tour which contains technician home and home end.
    pub fn new_initialized(instance: Arc<Instance>, technician: TechnicianId) -> TourResult<Self> {
        if instance.technician(technician).is_none() {
            return Err(TourError::precondition(format!("unknown technician {technician}")));
        }

        Ok(Self::create(instance, technician, true))
    }

    pub(crate) fn create(instance: Arc<Instance>, technician: TechnicianId, with_homes: bool) -> Self {
        let positions = vec![None; instance.node_count()];
        let mut tour = Self {
            instance,
            technician,
            nodes: Vec::with_capacity(8),
            positions,
            cache: RefCell::new(ScheduleCache::default()),
            version: 0,
            cost: None,
        };

        if with_homes {
            let technician = tour.technician();
            let homes = [technician.home, technician.home_end];
            tour.splice(0, 0, &homes);
        }

        tour
    }

    /// Returns problem instance.
    pub fn instance(&self) -> &Arc<Instance> {
        &self.instance
    }

    /// Returns id of the technician who owns the tour.
    pub fn technician_id(&self) -> TechnicianId {
        self.technician
    }

    /// Returns the technician who owns the tour.
    pub fn technician(&self) -> &Technician {
        &self.instance.technicians()[self.technician]
    }

    /// Appends node to the end of the tour. Schedule of the new last position is calculated
    /// immediately in O(1) when the rest of forward cache is valid.
    pub fn append_node(&mut self, id: NodeId) -> TourResult<()> {
        self.insert_at(self.nodes.len(), id)?;

        let last = self.nodes.len() - 1;
        if self.cache.get_mut().forward_valid == last {
            self.forward_at(last);
        }

        Ok(())
    }

    /// Inserts node right after `pred`.
    pub fn insert_after(&mut self, pred: NodeId, id: NodeId) -> TourResult<()> {
        let position = self.position_of(pred)?;
        self.insert_at(position + 1, id)
    }

    /// Inserts node right before `succ`.
    pub fn insert_before(&mut self, succ: NodeId, id: NodeId) -> TourResult<()> {
        let position = self.position_of(succ)?;
        self.insert_at(position, id)
    }

    /// Inserts node at given position shifting the rest to the right. Homes can be placed only at
    /// tour ends, requests and the technician depot only between them.
    pub fn insert_at(&mut self, position: usize, id: NodeId) -> TourResult<()> {
        let node = self.instance.get_node(id).ok_or_else(|| TourError::precondition(format!("unknown node {id}")))?;

        if self.contains(id) {
            return Err(TourError::AlreadyInTour(id));
        }

        if position > self.nodes.len() {
            return Err(TourError::precondition(format!("position {position} is out of range")));
        }

        let technician = self.technician();
        let is_allowed = match node.kind {
            NodeKind::Home => id == technician.home && position == 0,
            NodeKind::HomeEnd => id == technician.home_end && position == self.nodes.len() && !self.nodes.is_empty(),
            NodeKind::Request => position > 0 && !self.is_after_end(position),
            NodeKind::Depot => technician.depot == Some(id) && position > 0 && !self.is_after_end(position),
        };

        if !is_allowed {
            return Err(TourError::precondition(format!("node {id} cannot be placed at position {position}")));
        }

        self.splice(position, position, &[id]);

        Ok(())
    }

    /// Inserts requests (and, optionally, the technician depot) at given position keeping their order.
    pub fn insert_nodes(&mut self, position: usize, ids: &[NodeId]) -> TourResult<()> {
        if position > self.nodes.len() {
            return Err(TourError::precondition(format!("position {position} is out of range")));
        }

        if position == 0 || self.is_after_end(position) {
            return Err(TourError::precondition(format!("requests cannot be placed at position {position}")));
        }

        let mut seen = IntSet::default();
        for &id in ids {
            if !self.is_interior_node(id) {
                return Err(TourError::precondition(format!("node {id} is not a request")));
            }

            if self.contains(id) || !seen.insert(id) {
                return Err(TourError::AlreadyInTour(id));
            }
        }

        self.splice(position, position, ids);

        Ok(())
    }

    /// Removes node from the tour and returns its former position.
    pub fn remove_node(&mut self, id: NodeId) -> TourResult<usize> {
        let position = self.position_of(id)?;
        self.remove_at(position)?;

        Ok(position)
    }

    /// Removes request or depot visit at given position and returns its id. Homes cannot be removed.
    pub fn remove_at(&mut self, position: usize) -> TourResult<NodeId> {
        let id = self.get(position).ok_or_else(|| TourError::precondition(format!("no node at position {position}")))?;

        if self.instance.node(id).is_home() {
            return Err(TourError::precondition(format!("home {id} cannot be removed")));
        }

        self.splice(position, position + 1, &[]);

        Ok(id)
    }

    /// Reverses the segment between given positions (both inclusive).
    pub fn reverse(&mut self, from: usize, to: usize) -> TourResult<()> {
        if from > to || to >= self.nodes.len() {
            return Err(TourError::precondition(format!("invalid segment [{from}, {to}]")));
        }

        let patch = TourPatch::new(from, to + 1, self.nodes[from..=to].iter().rev().copied());
        self.apply_patch(&patch)
    }

    /// Replaces a visited request with an unvisited one.
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> TourResult<()> {
        let position = self.position_of(old)?;
        self.apply_patch(&TourPatch::new(position, position + 1, std::iter::once(new)))
    }

    /// Removes the segment between given positions (both inclusive) and returns it.
    pub fn extract_subtour(&mut self, from: usize, to: usize) -> TourResult<Vec<NodeId>> {
        if from > to || to >= self.nodes.len() {
            return Err(TourError::precondition(format!("invalid segment [{from}, {to}]")));
        }

        let segment = self.nodes[from..=to].to_vec();
        self.apply_patch(&TourPatch::new(from, to + 1, std::iter::empty()))?;

        Ok(segment)
    }

    /// Shortens the tour keeping the first `len` nodes.
    pub fn truncate(&mut self, len: usize) {
        if len < self.nodes.len() {
            self.splice(len, self.nodes.len(), &[]);
        }
    }

    /// Removes all nodes including homes.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Replaces a window of positions with new requests. It is the mutation used to apply moves.
    pub fn apply_patch(&mut self, patch: &TourPatch) -> TourResult<()> {
        self.validate_patch(patch)?;
        self.splice(patch.start, patch.end, patch.nodes.as_slice());

        Ok(())
    }

    /// Checks whether the patch can be applied to the tour: the window is inside the interior and
    /// new nodes are requests or the technician depot which are either absent or taken from the
    /// replaced window.
    pub fn validate_patch(&self, patch: &TourPatch) -> TourResult<()> {
        let len = self.nodes.len();
        if len == 0 {
            return Err(TourError::EmptyTour);
        }

        if patch.start == 0 || patch.start > patch.end || patch.end >= len {
            return Err(TourError::precondition(format!(
                "window [{}, {}) is outside of the tour interior",
                patch.start, patch.end
            )));
        }

        let mut seen = IntSet::default();
        for &id in patch.nodes.iter() {
            if !self.is_interior_node(id) {
                return Err(TourError::precondition(format!("node {id} is not a request")));
            }

            let is_outside = self.positions[id].is_some_and(|position| position < patch.start || position >= patch.end);
            if is_outside || !seen.insert(id) {
                return Err(TourError::AlreadyInTour(id));
            }
        }

        Ok(())
    }

    /// Returns node id at given position.
    pub fn get(&self, position: usize) -> Option<NodeId> {
        self.nodes.get(position).copied()
    }

    /// Returns the first node.
    pub fn first_node(&self) -> TourResult<NodeId> {
        self.nodes.first().copied().ok_or(TourError::EmptyTour)
    }

    /// Returns the last node.
    pub fn last_node(&self) -> TourResult<NodeId> {
        self.nodes.last().copied().ok_or(TourError::EmptyTour)
    }

    /// Returns all node ids in visit order.
    pub fn nodes(&self) -> &[NodeId] {
        self.nodes.as_slice()
    }

    /// Returns visited node ids in order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Returns a detached cursor which fails on access once the tour is modified.
    pub fn cursor(&self) -> TourCursor {
        TourCursor { version: self.version, position: 0 }
    }

    /// Returns visited requests in order.
    pub fn requests(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied().filter(|id| self.instance.is_request(*id))
    }

    /// Returns positions of the requests between homes.
    pub fn request_positions(&self) -> Range<usize> {
        if self.is_closed() { 1..self.nodes.len() - 1 } else { 0..0 }
    }

    /// Returns positions where a request can be inserted (before the node at position).
    pub fn insertion_positions(&self) -> Range<usize> {
        if self.is_closed() { 1..self.nodes.len() } else { 0..0 }
    }

    /// Returns amount of nodes including homes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if tour has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if tour has no requests.
    pub fn has_no_requests(&self) -> bool {
        self.request_count() == 0
    }

    /// Returns amount of visited requests.
    pub fn request_count(&self) -> usize {
        self.nodes.iter().filter(|id| self.instance.is_request(**id)).count()
    }

    /// Returns true if tour starts at home and ends at home end.
    pub fn is_closed(&self) -> bool {
        self.nodes.len() >= 2
            && self.instance.node(self.nodes[0]).kind == NodeKind::Home
            && self.instance.node(self.nodes[self.nodes.len() - 1]).kind == NodeKind::HomeEnd
    }

    /// Checks whether node is visited by the tour.
    pub fn contains(&self, id: NodeId) -> bool {
        self.positions.get(id).is_some_and(|position| position.is_some())
    }

    /// Returns position of the node.
    pub fn position_of(&self, id: NodeId) -> TourResult<usize> {
        self.positions.get(id).copied().flatten().ok_or(TourError::NotInTour(id))
    }

    /// Returns position of the depot visit.
    pub fn depot_position(&self) -> Option<usize> {
        self.technician().depot.and_then(|depot| self.positions[depot])
    }

    /// Checks whether the tour visits the main depot.
    pub fn is_depot_visited(&self) -> bool {
        self.depot_position().is_some()
    }

    /// Checks whether the main depot is visited at the node or before it: all tools are available
    /// after the visit.
    pub fn is_depot_visited_at(&self, id: NodeId) -> TourResult<bool> {
        let position = self.position_of(id)?;
        Ok(self.forward_at(position).depot_visited)
    }

    /// Returns modification counter.
    pub fn version(&self) -> usize {
        self.version
    }

    /// Returns the earliest service start time at the node.
    pub fn earliest_arrival_time(&self, id: NodeId) -> TourResult<Timestamp> {
        let position = self.position_of(id)?;
        Ok(self.forward_at(position).arrival)
    }

    /// Returns the latest service start time at the node which keeps this and all downstream
    /// time windows satisfied.
    pub fn latest_arrival_time(&self, id: NodeId) -> TourResult<Timestamp> {
        let position = self.position_of(id)?;
        Ok(self.backward_at(position).latest_arrival)
    }

    /// Returns waiting time before service start at the node.
    pub fn waiting_time(&self, id: NodeId) -> TourResult<Duration> {
        let position = self.position_of(id)?;
        Ok(self.forward_at(position).waiting)
    }

    /// Returns forward slack: max delay of service start at the node without violating downstream
    /// time windows. It is negative if the schedule is already late.
    pub fn fwd_slack_time(&self, id: NodeId) -> TourResult<Duration> {
        let position = self.position_of(id)?;
        Ok(self.backward_at(position).latest_arrival - self.forward_at(position).arrival)
    }

    /// Returns cumulative load after visiting the node.
    pub fn load_at(&self, id: NodeId) -> TourResult<Demand> {
        let position = self.position_of(id)?;
        Ok(self.forward_at(position).load)
    }

    /// Returns departure time from the node.
    pub fn departure_time(&self, id: NodeId) -> TourResult<Timestamp> {
        let position = self.position_of(id)?;
        Ok(self.forward_at(position).departure)
    }

    /// Returns lateness of service start at the node.
    pub fn lateness(&self, id: NodeId) -> TourResult<Duration> {
        let position = self.position_of(id)?;
        Ok(self.forward_at(position).lateness)
    }

    /// Returns schedule of the visit at given position.
    pub fn visit_at(&self, position: usize) -> Option<VisitSchedule> {
        let node = self.get(position)?;
        let forward = self.forward_at(position);
        let backward = self.backward_at(position);

        Some(VisitSchedule {
            node,
            arrival: forward.arrival,
            waiting: forward.waiting,
            departure: forward.departure,
            lateness: forward.lateness,
            latest_arrival: backward.latest_arrival,
            slack: backward.latest_arrival - forward.arrival,
            load: forward.load,
        })
    }

    /// Returns aggregated schedule of the whole tour.
    pub fn summary(&self) -> ScheduleSummary {
        if self.nodes.is_empty() {
            return ScheduleSummary::default();
        }

        let last = self.forward_at(self.nodes.len() - 1);
        let first = self.forward_at(0);

        ScheduleSummary::new(self.nodes.len(), first.arrival, &last, last.latest_start)
    }

    /// Returns time span between the first node service start and the last node departure.
    pub fn minimal_duration(&self) -> Duration {
        self.summary().minimal_duration()
    }

    /// Returns the latest tour start which does not delay its end.
    pub fn latest_start_time(&self) -> Timestamp {
        self.summary().latest_start_time()
    }

    /// Returns tour duration when it starts at its latest start time.
    pub fn working_time(&self) -> Duration {
        self.summary().working_time()
    }

    /// Returns total waiting time.
    pub fn total_waiting_time(&self) -> Duration {
        self.summary().waiting
    }

    /// Returns total travel time.
    pub fn total_travel_time(&self) -> Duration {
        self.summary().travel_time
    }

    /// Returns total travel distance.
    pub fn total_distance(&self) -> Distance {
        self.summary().distance
    }

    /// Returns total lateness.
    pub fn total_lateness(&self) -> Duration {
        self.summary().lateness
    }

    /// Returns max load over all positions.
    pub fn max_load(&self) -> Demand {
        self.summary().max_load
    }

    /// Evaluates the tour as if the patch was applied, without mutating it. Only the patched window
    /// and the suffix till the point where the new schedule meets the cached one are visited.
    pub fn summarize(&self, patch: &TourPatch) -> TourResult<ScheduleSummary> {
        self.validate_patch(patch)?;

        let instance = self.instance.as_ref();
        let technician = self.technician();
        let last = self.nodes.len() - 1;
        let size = self.nodes.len() - (patch.end - patch.start) + patch.nodes.len();
        let start = self.forward_at(0).arrival;

        let mut prev = instance.node(self.nodes[patch.start - 1]);
        let mut state = self.forward_at(patch.start - 1);
        for &id in patch.nodes.iter() {
            let node = instance.node(id);
            state = state.next(instance, technician, prev, node);
            prev = node;
        }

        let mut position = patch.end;
        state = state.next(instance, technician, prev, instance.node(self.nodes[position]));

        // backward state after the window is not affected by the patch
        let latest_first_arrival = state.latest_start.min(self.backward_at(position).latest_arrival - state.span);

        loop {
            let original = self.forward_at(position);

            // the same service start and tools availability mean that the rest of schedule is the same
            if state.arrival == original.arrival && state.depot_visited == original.depot_visited {
                return Ok(self.summarize_synced(size, start, position, &state, &original, latest_first_arrival));
            }

            if position == last {
                return Ok(ScheduleSummary::new(size, start, &state, latest_first_arrival));
            }

            position += 1;
            state = state.next(
                instance,
                technician,
                instance.node(self.nodes[position - 1]),
                instance.node(self.nodes[position]),
            );
        }
    }

    fn summarize_synced(
        &self,
        size: usize,
        start: Timestamp,
        position: usize,
        state: &ForwardState,
        original: &ForwardState,
        latest_first_arrival: Timestamp,
    ) -> ScheduleSummary {
        let last = self.forward_at(self.nodes.len() - 1);
        let next = (position + 1 < self.nodes.len()).then(|| self.backward_at(position + 1));

        let max_load = match next {
            Some(next) => {
                state.max_load.max_per_dim(state.load + next.suffix_load).max_per_dim(next.restocked_load)
            }
            None => state.max_load,
        };

        // load after a downstream depot visit does not depend on the patch
        let load = if next.is_some_and(|next| next.has_depot) { last.load } else { last.load + (state.load - original.load) };

        ScheduleSummary {
            size,
            start,
            end: last.departure,
            travel_time: state.travel_time + (last.travel_time - original.travel_time),
            distance: state.distance + (last.distance - original.distance),
            service_time: state.service_time + (last.service_time - original.service_time),
            waiting: state.total_waiting + (last.total_waiting - original.total_waiting),
            lateness: state.total_lateness + (last.total_lateness - original.total_lateness),
            latest_first_arrival,
            load,
            max_load,
            missing_tools: state.missing_tools + (last.missing_tools - original.missing_tools),
        }
    }

    /// Evaluates timing of the tour after inserting `id` before `position` in constant time: a
    /// delay of service start at the successor is absorbed by waiting at the following nodes and
    /// the rest of it moves the tour end. Returns `None` when the successor would start earlier,
    /// such a change is evaluated by [Tour::summarize].
    pub fn push_forward(&self, position: usize, id: NodeId) -> TourResult<Option<ScheduleTiming>> {
        self.validate_patch(&TourPatch::insertion(position, id))?;

        let instance = self.instance.as_ref();
        let technician = self.technician();
        let (pred, node, succ) =
            (instance.node(self.nodes[position - 1]), instance.node(id), instance.node(self.nodes[position]));

        let inserted = self.forward_at(position - 1).next(instance, technician, pred, node);
        let shifted = inserted.next(instance, technician, node, succ);
        let original = self.forward_at(position);

        let delay = shifted.arrival - original.arrival;
        if delay < 0. {
            return Ok(None);
        }

        let last = self.forward_at(self.nodes.len() - 1);
        let downstream_waiting = last.total_waiting - original.total_waiting;
        let absorbed = delay.min(downstream_waiting);

        Ok(Some(ScheduleTiming {
            start: self.forward_at(0).arrival,
            end: last.departure + delay - absorbed,
            waiting: shifted.total_waiting + downstream_waiting - absorbed,
            latest_first_arrival: shifted.latest_start.min(self.backward_at(position).latest_arrival - shifted.span),
        }))
    }

    /// Attaches cost delegate used by [Tour::total_cost].
    pub fn attach_cost_delegate(&mut self, cost: Arc<dyn CostDelegate + Send + Sync>) {
        self.cost = Some(cost);
    }

    /// Returns tour cost using attached delegate or minimal duration when there is none.
    pub fn total_cost(&self) -> Cost {
        match self.cost.as_ref() {
            Some(cost) => cost.evaluate_tour(self),
            None => self.minimal_duration(),
        }
    }

    /// Returns node sequence formatted as `<3,7,12,9>`.
    pub fn node_seq_string(&self) -> String {
        let ids = self.nodes.iter().map(|id| id.to_string()).collect::<Vec<_>>();
        format!("<{}>", ids.join(","))
    }

    /// Returns cache validity markers: forward state is valid for positions before the first
    /// value, backward state is valid starting from the second one.
    pub fn dirty_range(&self) -> (usize, usize) {
        let cache = self.cache.borrow();
        (cache.forward_valid, cache.backward_valid_from)
    }

    /// Checks whether the node can be placed between homes: it is a request or own depot.
    fn is_interior_node(&self, id: NodeId) -> bool {
        self.instance.is_request(id) || self.technician().depot == Some(id)
    }

    fn is_after_end(&self, position: usize) -> bool {
        position == self.nodes.len()
            && self.nodes.last().is_some_and(|id| self.instance.node(*id).kind == NodeKind::HomeEnd)
    }

    fn splice(&mut self, start: usize, end: usize, added: &[NodeId]) {
        for position in start..end {
            self.positions[self.nodes[position]] = None;
        }

        self.nodes.splice(start..end, added.iter().copied());

        for position in start..self.nodes.len() {
            self.positions[self.nodes[position]] = Some(position);
        }

        self.cache.get_mut().splice(start, end, added.len());
        self.version += 1;
    }

    fn forward_at(&self, position: usize) -> ForwardState {
        let mut cache = self.cache.borrow_mut();

        while cache.forward_valid <= position {
            let current = cache.forward_valid;
            let node = self.instance.node(self.nodes[current]);

            let state = if current == 0 {
                ForwardState::first(node)
            } else {
                let prev = self.instance.node(self.nodes[current - 1]);
                cache.forward[current - 1].next(&self.instance, self.technician(), prev, node)
            };

            cache.forward[current] = state;
            cache.forward_valid += 1;
        }

        cache.forward[position]
    }

    fn backward_at(&self, position: usize) -> BackwardState {
        let mut cache = self.cache.borrow_mut();
        let last = self.nodes.len() - 1;

        while cache.backward_valid_from > position {
            let current = cache.backward_valid_from - 1;
            let node = self.instance.node(self.nodes[current]);

            let state = if current == last {
                BackwardState::last(node)
            } else {
                cache.backward[current + 1].previous(&self.instance, node, self.instance.node(self.nodes[current + 1]))
            };

            cache.backward[current] = state;
            cache.backward_valid_from = current;
        }

        cache.backward[position]
    }
}

impl Debug for Tour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tour")
            .field("technician", &self.technician)
            .field("nodes", &self.nodes)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl Display for Tour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "technician: {}, size: {}, nodes: {}", self.technician, self.nodes.len(), self.node_seq_string())
    }
}

/// A detached iterator over tour nodes. It remembers the tour modification counter and fails
/// fast with [TourError::ConcurrentModification] once the tour is changed.
#[derive(Clone, Debug)]
pub struct TourCursor {
    version: usize,
    position: usize,
}

impl TourCursor {
    /// Returns the next node or `None` at the end of the tour.
    pub fn next(&mut self, tour: &Tour) -> TourResult<Option<NodeId>> {
        if tour.version != self.version {
            return Err(TourError::ConcurrentModification);
        }

        let item = tour.get(self.position);
        if item.is_some() {
            self.position += 1;
        }

        Ok(item)
    }

    /// Moves the cursor back to the first node.
    pub fn restart(&mut self) {
        self.position = 0;
    }
}
