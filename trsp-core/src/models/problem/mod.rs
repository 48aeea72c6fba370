//! Problem domain models: an immutable catalog of nodes, a fleet of technicians and
//! transport costs between locations.

mod builders;
pub use self::builders::*;

mod costs;
pub use self::costs::*;

mod fleet;
pub use self::fleet::*;

mod nodes;
pub use self::nodes::*;

use crate::models::common::{Distance, Duration, NodeId, TechnicianId};
use std::sync::Arc;

/// An immutable problem instance. Tours and solutions keep a shared reference to it, the instance
/// knows nothing about them.
pub struct Instance {
    nodes: Vec<Node>,
    technicians: Vec<Technician>,
    requests: Vec<NodeId>,
    transport: Arc<dyn TransportCost + Send + Sync>,
}

impl Instance {
    /// Returns node by its id.
    ///
    /// # Panics
    /// Panics if the id was not allocated by this instance. Tours validate ids on insertion, so
    /// lookups of visited nodes never fail.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Returns node by its id or `None` if id is unknown.
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Returns all nodes ordered by id.
    pub fn nodes(&self) -> &[Node] {
        self.nodes.as_slice()
    }

    /// Returns total amount of nodes (homes, home ends, requests and depot duplicates).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns technician by id.
    pub fn technician(&self, id: TechnicianId) -> Option<&Technician> {
        self.technicians.get(id)
    }

    /// Returns all technicians.
    pub fn technicians(&self) -> &[Technician] {
        self.technicians.as_slice()
    }

    /// Returns ids of all requests.
    pub fn requests(&self) -> &[NodeId] {
        self.requests.as_slice()
    }

    /// Checks whether given id belongs to a request node.
    pub fn is_request(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.kind == NodeKind::Request)
    }

    /// Checks whether given id belongs to a main depot duplicate.
    pub fn is_depot(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.kind == NodeKind::Depot)
    }

    /// Returns travel duration between two nodes.
    pub fn duration(&self, from: NodeId, to: NodeId) -> Duration {
        self.transport.duration(self.nodes[from].location, self.nodes[to].location)
    }

    /// Returns travel distance between two nodes.
    pub fn distance(&self, from: NodeId, to: NodeId) -> Distance {
        self.transport.distance(self.nodes[from].location, self.nodes[to].location)
    }

    /// Returns transport costs.
    pub fn transport(&self) -> &(dyn TransportCost + Send + Sync) {
        self.transport.as_ref()
    }
}
