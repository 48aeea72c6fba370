use crate::models::common::{Demand, Duration, Location, NodeId, TimeWindow};
use rustc_hash::FxHashSet;

/// A set of skill or tool ids.
pub type Attributes = FxHashSet<usize>;

/// Specifies a node role in a tour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A technician home where the tour starts.
    Home,
    /// A duplicate of the technician home where the tour ends.
    HomeEnd,
    /// A service request.
    Request,
    /// A duplicate of the main depot owned by one technician. Visiting it gives access to all
    /// tools and restocks spare parts.
    Depot,
}

/// Represents a depot, technician home or a service request. Immutable once the instance is built.
#[derive(Clone, Debug)]
pub struct Node {
    /// A unique node id.
    pub id: NodeId,
    /// A node kind.
    pub kind: NodeKind,
    /// A location in the transport matrix.
    pub location: Location,
    /// A time window when service can start.
    pub time_window: TimeWindow,
    /// A service duration.
    pub service_time: Duration,
    /// A demand per resource type.
    pub demand: Demand,
    /// Skills required to serve the node.
    pub skills: Attributes,
    /// Tools required to serve the node.
    pub tools: Attributes,
}

impl Node {
    /// Returns true if node is a technician home or home end.
    pub fn is_home(&self) -> bool {
        matches!(self.kind, NodeKind::Home | NodeKind::HomeEnd)
    }

    /// Returns true if node is a main depot duplicate.
    pub fn is_depot(&self) -> bool {
        self.kind == NodeKind::Depot
    }
}
