use crate::models::common::{Demand, Distance, Duration, NodeId, Timestamp};
use crate::models::problem::{Instance, Node, NodeKind, Technician};

/// Forward attributes of a tour position: they depend only on the position and its predecessors.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ForwardState {
    /// Earliest service start.
    pub arrival: Timestamp,
    pub waiting: Duration,
    pub lateness: Duration,
    pub departure: Timestamp,
    pub travel_time: Duration,
    pub distance: Distance,
    pub service_time: Duration,
    pub total_waiting: Duration,
    pub total_lateness: Duration,
    /// Sum of service and travel durations from the first node till this one, excluding own service.
    pub span: Duration,
    pub load: Demand,
    pub max_load: Demand,
    /// Latest start of the first node which keeps all time windows till this position.
    pub latest_start: Timestamp,
    pub depot_visited: bool,
    /// Amount of requests served without required tools: neither carried from home nor picked
    /// up at the depot before.
    pub missing_tools: usize,
}

impl ForwardState {
    pub fn first(node: &Node) -> Self {
        let arrival = node.time_window.start;

        Self {
            arrival,
            waiting: 0.,
            lateness: 0.,
            departure: arrival + node.service_time,
            travel_time: 0.,
            distance: 0.,
            service_time: node.service_time,
            total_waiting: 0.,
            total_lateness: 0.,
            span: 0.,
            load: node.demand,
            max_load: node.demand,
            latest_start: node.time_window.end,
            depot_visited: node.is_depot(),
            missing_tools: 0,
        }
    }

    pub fn next(&self, instance: &Instance, technician: &Technician, prev: &Node, node: &Node) -> Self {
        let travel_time = instance.duration(prev.id, node.id);
        let physical_arrival = self.departure + travel_time;

        let arrival = physical_arrival.max(node.time_window.start);
        let waiting = arrival - physical_arrival;
        let lateness = (arrival - node.time_window.end).max(0.);
        let span = self.span + prev.service_time + travel_time;
        // spare parts are restocked at the depot
        let load = if node.is_depot() { Demand::default() } else { self.load + node.demand };
        let is_missing_tools =
            node.kind == NodeKind::Request && !self.depot_visited && !technician.has_tools(node);

        Self {
            arrival,
            waiting,
            lateness,
            departure: arrival + node.service_time,
            travel_time: self.travel_time + travel_time,
            distance: self.distance + instance.distance(prev.id, node.id),
            service_time: self.service_time + node.service_time,
            total_waiting: self.total_waiting + waiting,
            total_lateness: self.total_lateness + lateness,
            span,
            load,
            max_load: self.max_load.max_per_dim(load),
            latest_start: self.latest_start.min(node.time_window.end - span),
            depot_visited: self.depot_visited || node.is_depot(),
            missing_tools: self.missing_tools + usize::from(is_missing_tools),
        }
    }
}

/// Backward attributes of a tour position: they depend only on the position and its successors.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BackwardState {
    pub latest_arrival: Timestamp,
    /// Max of demand sums over all non-empty ranges starting at this position and ending before
    /// the next depot visit. It is zero at the depot.
    pub suffix_load: Demand,
    /// Max load at or after the next depot visit: it does not depend on preceding nodes.
    pub restocked_load: Demand,
    /// True if the depot is visited at this position or later.
    pub has_depot: bool,
}

impl BackwardState {
    pub fn last(node: &Node) -> Self {
        let suffix_load = if node.is_depot() { Demand::default() } else { node.demand };

        Self {
            latest_arrival: node.time_window.end,
            suffix_load,
            restocked_load: Demand::default(),
            has_depot: node.is_depot(),
        }
    }

    pub fn previous(&self, instance: &Instance, node: &Node, next: &Node) -> Self {
        let latest_arrival =
            node.time_window.end.min(self.latest_arrival - node.service_time - instance.duration(node.id, next.id));

        if node.is_depot() {
            Self {
                latest_arrival,
                suffix_load: Demand::default(),
                restocked_load: self.suffix_load.non_negative().max_per_dim(self.restocked_load),
                has_depot: true,
            }
        } else {
            Self {
                latest_arrival,
                suffix_load: node.demand + self.suffix_load.non_negative(),
                restocked_load: self.restocked_load,
                has_depot: self.has_depot,
            }
        }
    }
}

/// Keeps cached schedule attributes with two validity markers: forward state is valid for
/// positions `[0, forward_valid)` and backward state for positions `[backward_valid_from, len)`.
#[derive(Clone, Debug, Default)]
pub(crate) struct ScheduleCache {
    pub forward: Vec<ForwardState>,
    pub backward: Vec<BackwardState>,
    pub forward_valid: usize,
    pub backward_valid_from: usize,
}

impl ScheduleCache {
    /// Replaces positions `[start, end)` with `added` stale positions. Forward state stays valid
    /// before `start` and backward state stays valid after the replaced window.
    pub fn splice(&mut self, start: usize, end: usize, added: usize) {
        let removed = end - start;

        self.forward.splice(start..end, std::iter::repeat_n(ForwardState::default(), added));
        self.backward.splice(start..end, std::iter::repeat_n(BackwardState::default(), added));

        self.forward_valid = self.forward_valid.min(start);

        let backward_valid_from =
            if self.backward_valid_from >= end { self.backward_valid_from - removed + added } else { start + added };
        self.backward_valid_from = backward_valid_from.max(start + added);
    }
}

/// Aggregated schedule attributes of a whole tour. It is produced either from cached state or
/// from a non-materialized tour change.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScheduleSummary {
    /// Amount of visited nodes.
    pub size: usize,
    /// Service start at the first node.
    pub start: Timestamp,
    /// Departure from the last node.
    pub end: Timestamp,
    /// Total travel duration.
    pub travel_time: Duration,
    /// Total travel distance.
    pub distance: Distance,
    /// Total service duration.
    pub service_time: Duration,
    /// Total waiting duration.
    pub waiting: Duration,
    /// Total lateness: sum of service start violations over time window ends.
    pub lateness: Duration,
    /// Latest arrival at the first node which keeps all time windows.
    pub latest_first_arrival: Timestamp,
    /// Load at the last node.
    pub load: Demand,
    /// Max load over all nodes.
    pub max_load: Demand,
    /// Amount of requests served without required tools.
    pub missing_tools: usize,
}

impl ScheduleSummary {
    pub(crate) fn new(size: usize, start: Timestamp, last: &ForwardState, latest_first_arrival: Timestamp) -> Self {
        Self {
            size,
            start,
            end: last.departure,
            travel_time: last.travel_time,
            distance: last.distance,
            service_time: last.service_time,
            waiting: last.total_waiting,
            lateness: last.total_lateness,
            latest_first_arrival,
            load: last.load,
            max_load: last.max_load,
            missing_tools: last.missing_tools,
        }
    }

    /// Returns timing part of the summary.
    pub fn timing(&self) -> ScheduleTiming {
        ScheduleTiming {
            start: self.start,
            end: self.end,
            waiting: self.waiting,
            latest_first_arrival: self.latest_first_arrival,
        }
    }

    /// Returns time span between the first node service start and the last node departure.
    pub fn minimal_duration(&self) -> Duration {
        if self.size == 0 { 0. } else { self.timing().minimal_duration() }
    }

    /// Returns latest time the tour can start without delaying its end.
    pub fn latest_start_time(&self) -> Timestamp {
        self.timing().latest_start_time()
    }

    /// Returns working time: the tour duration when it starts at its latest start time.
    pub fn working_time(&self) -> Duration {
        if self.size == 0 { 0. } else { self.timing().working_time() }
    }
}

/// Time attributes of a non-empty tour which define its duration based costs.
#[derive(Clone, Copy, Debug)]
pub struct ScheduleTiming {
    /// Service start at the first node.
    pub start: Timestamp,
    /// Departure from the last node.
    pub end: Timestamp,
    /// Total waiting duration.
    pub waiting: Duration,
    /// Latest arrival at the first node which keeps all time windows.
    pub latest_first_arrival: Timestamp,
}

impl ScheduleTiming {
    /// Returns time span between the first node service start and the last node departure.
    pub fn minimal_duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns latest time the tour can start without delaying its end: the start can be
    /// postponed by the first node slack, limited by the total waiting time.
    pub fn latest_start_time(&self) -> Timestamp {
        self.start + (self.latest_first_arrival - self.start).min(self.waiting).max(0.)
    }

    /// Returns tour duration when it starts at its latest start time.
    pub fn working_time(&self) -> Duration {
        self.end - self.latest_start_time()
    }
}

/// Schedule of a single visit.
#[derive(Clone, Copy, Debug)]
pub struct VisitSchedule {
    /// Visited node.
    pub node: NodeId,
    /// Earliest service start.
    pub arrival: Timestamp,
    /// Waiting before service start.
    pub waiting: Duration,
    /// Departure after service.
    pub departure: Timestamp,
    /// Service start delay after time window end.
    pub lateness: Duration,
    /// Latest service start which keeps this and all downstream time windows.
    pub latest_arrival: Timestamp,
    /// Max delay of service start which does not violate downstream time windows.
    pub slack: Duration,
    /// Cumulative load after the visit.
    pub load: Demand,
}
