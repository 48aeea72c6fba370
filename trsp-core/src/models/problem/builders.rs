//! Provides a way to build the problem instance using the builder pattern.

#[cfg(test)]
#[path = "../../../tests/unit/models/problem/builders_test.rs"]
mod builders_test;

use crate::models::common::{Demand, Duration, Location, NodeId, TechnicianId, TimeWindow};
use crate::models::problem::{Attributes, Instance, Node, NodeKind, Technician, TransportCost};
use std::sync::Arc;
use trsp_heuristics::prelude::{GenericError, GenericResult};

/// Allocates node ids. It is owned by the instance building context, so ids are unique and
/// dense within one instance and there is no shared global counter.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: NodeId,
}

impl IdAllocator {
    /// Returns the next free id.
    pub fn next_id(&mut self) -> NodeId {
        let id = self.next;
        self.next += 1;

        id
    }

    /// Returns amount of allocated ids.
    pub fn allocated(&self) -> usize {
        self.next
    }
}

/// Provides a way to describe a service request.
#[derive(Clone, Debug)]
pub struct RequestBuilder {
    location: Location,
    time_window: TimeWindow,
    service_time: Duration,
    demand: Vec<i32>,
    skills: Attributes,
    tools: Attributes,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self {
            location: 0,
            time_window: TimeWindow::max(),
            service_time: 0.,
            demand: vec![],
            skills: Default::default(),
            tools: Default::default(),
        }
    }
}

impl RequestBuilder {
    /// Sets request location.
    pub fn location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Sets request time window.
    pub fn time_window(mut self, start: f64, end: f64) -> Self {
        self.time_window = TimeWindow::new(start, end);
        self
    }

    /// Sets service duration.
    pub fn service_time(mut self, duration: Duration) -> Self {
        self.service_time = duration;
        self
    }

    /// Sets demand per resource type.
    pub fn demand(mut self, demand: &[i32]) -> Self {
        self.demand = demand.to_vec();
        self
    }

    /// Sets required skills.
    pub fn skills(mut self, skills: impl IntoIterator<Item = usize>) -> Self {
        self.skills = skills.into_iter().collect();
        self
    }

    /// Sets required tools.
    pub fn tools(mut self, tools: impl IntoIterator<Item = usize>) -> Self {
        self.tools = tools.into_iter().collect();
        self
    }
}

/// Provides a way to describe a technician.
#[derive(Clone, Debug)]
pub struct TechnicianBuilder {
    location: Location,
    shift: TimeWindow,
    capacity: Vec<i32>,
    skills: Attributes,
    tools: Attributes,
}

impl Default for TechnicianBuilder {
    fn default() -> Self {
        Self {
            location: 0,
            shift: TimeWindow::max(),
            capacity: vec![],
            skills: Default::default(),
            tools: Default::default(),
        }
    }
}

impl TechnicianBuilder {
    /// Sets home location.
    pub fn location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Sets working shift: the tour cannot start earlier than shift start and should end before shift end.
    pub fn shift(mut self, start: f64, end: f64) -> Self {
        self.shift = TimeWindow::new(start, end);
        self
    }

    /// Sets capacity per resource type.
    pub fn capacity(mut self, capacity: &[i32]) -> Self {
        self.capacity = capacity.to_vec();
        self
    }

    /// Sets owned skills.
    pub fn skills(mut self, skills: impl IntoIterator<Item = usize>) -> Self {
        self.skills = skills.into_iter().collect();
        self
    }

    /// Sets owned tools.
    pub fn tools(mut self, tools: impl IntoIterator<Item = usize>) -> Self {
        self.tools = tools.into_iter().collect();
        self
    }
}

/// Provides a way to describe the main depot where technicians pick up tools and spare parts.
#[derive(Clone, Debug)]
pub struct DepotBuilder {
    location: Location,
    time_window: TimeWindow,
    service_time: Duration,
}

impl Default for DepotBuilder {
    fn default() -> Self {
        Self { location: 0, time_window: TimeWindow::max(), service_time: 0. }
    }
}

impl DepotBuilder {
    /// Sets depot location.
    pub fn location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Sets opening hours of the depot.
    pub fn time_window(mut self, start: f64, end: f64) -> Self {
        self.time_window = TimeWindow::new(start, end);
        self
    }

    /// Sets duration of a depot visit.
    pub fn service_time(mut self, duration: Duration) -> Self {
        self.service_time = duration;
        self
    }
}

/// Builds an immutable [Instance]. Ids are allocated in the order nodes are added, main depot
/// duplicates get the last ids, one per technician.
pub struct InstanceBuilder {
    ids: IdAllocator,
    nodes: Vec<Node>,
    technicians: Vec<Technician>,
    depot: Option<DepotBuilder>,
    requests: Vec<NodeId>,
    transport: Arc<dyn TransportCost + Send + Sync>,
    errors: Vec<GenericError>,
}

impl InstanceBuilder {
    /// Creates a new instance of `InstanceBuilder`.
    pub fn new(transport: Arc<dyn TransportCost + Send + Sync>) -> Self {
        Self {
            ids: IdAllocator::default(),
            nodes: vec![],
            technicians: vec![],
            depot: None,
            requests: vec![],
            transport,
            errors: vec![],
        }
    }

    /// Adds a request and returns its node id.
    pub fn add_request(&mut self, request: RequestBuilder) -> NodeId {
        let id = self.ids.next_id();
        let demand = self.create_demand(id, request.demand.as_slice());

        if request.service_time < 0. {
            self.errors.push(format!("request {id} has negative service time").into());
        }

        self.add_node(Node {
            id,
            kind: NodeKind::Request,
            location: request.location,
            time_window: request.time_window,
            service_time: request.service_time,
            demand,
            skills: request.skills,
            tools: request.tools,
        });
        self.requests.push(id);

        id
    }

    /// Adds a technician, allocates ids for its home and home end nodes and returns technician id.
    pub fn add_technician(&mut self, technician: TechnicianBuilder) -> TechnicianId {
        let technician_id = self.technicians.len();
        let home = self.ids.next_id();
        let home_end = self.ids.next_id();

        [(home, NodeKind::Home), (home_end, NodeKind::HomeEnd)].into_iter().for_each(|(id, kind)| {
            self.add_node(Node {
                id,
                kind,
                location: technician.location,
                time_window: technician.shift.clone(),
                service_time: 0.,
                demand: Demand::default(),
                skills: Default::default(),
                tools: Default::default(),
            })
        });

        let capacity = self.create_demand(home, technician.capacity.as_slice());
        self.technicians.push(Technician {
            id: technician_id,
            home,
            home_end,
            depot: None,
            capacity,
            skills: technician.skills,
            tools: technician.tools,
        });

        technician_id
    }

    /// Sets the main depot. Every technician gets its own duplicate of it, so a depot visit is
    /// a regular tour node.
    pub fn set_main_depot(&mut self, depot: DepotBuilder) {
        if depot.service_time < 0. {
            self.errors.push("main depot has negative service time".into());
        }

        self.depot = Some(depot);
    }

    /// Builds the instance. Fails with all found issues joined into one error.
    pub fn build(mut self) -> GenericResult<Instance> {
        if let Some(depot) = self.depot.take() {
            for technician in 0..self.technicians.len() {
                let id = self.ids.next_id();

                self.add_node(Node {
                    id,
                    kind: NodeKind::Depot,
                    location: depot.location,
                    time_window: depot.time_window.clone(),
                    service_time: depot.service_time,
                    demand: Demand::default(),
                    skills: Default::default(),
                    tools: Default::default(),
                });
                self.technicians[technician].depot = Some(id);
            }
        }

        if !self.errors.is_empty() {
            return Err(GenericError::join_many(self.errors.as_slice(), ", ").into());
        }

        if self.technicians.is_empty() {
            return Err("instance has no technicians".into());
        }

        Ok(Instance { nodes: self.nodes, technicians: self.technicians, requests: self.requests, transport: self.transport })
    }

    fn add_node(&mut self, node: Node) {
        if node.location >= self.transport.size() {
            self.errors.push(format!("node {} has location {} outside of the matrix", node.id, node.location).into());
        }

        if node.time_window.start > node.time_window.end {
            self.errors.push(format!("node {} has invalid time window", node.id).into());
        }

        self.nodes.push(node);
    }

    fn create_demand(&mut self, id: NodeId, data: &[i32]) -> Demand {
        match Demand::new(data) {
            Some(demand) if !demand.has_negative() => demand,
            Some(_) => {
                self.errors.push(format!("node {id} has negative demand").into());
                Demand::default()
            }
            None => {
                self.errors.push(format!("node {id} has too many demand dimensions").into());
                Demand::default()
            }
        }
    }
}
