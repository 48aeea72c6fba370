use crate::models::common::{Demand, NodeId, TechnicianId};
use crate::models::problem::{Attributes, Node};

/// Represents a technician: a resource which serves requests on its own tour. The availability of
/// the technician is defined by the time window of its home node.
#[derive(Clone, Debug)]
pub struct Technician {
    /// A technician id (index in the fleet).
    pub id: TechnicianId,
    /// A node where the tour starts.
    pub home: NodeId,
    /// A node where the tour ends. It shares location with `home`.
    pub home_end: NodeId,
    /// A main depot duplicate the technician can visit during the tour, if the instance has one.
    pub depot: Option<NodeId>,
    /// A capacity per resource type.
    pub capacity: Demand,
    /// Skills owned by the technician.
    pub skills: Attributes,
    /// Tools owned by the technician.
    pub tools: Attributes,
}

impl Technician {
    /// Checks whether technician has all skills required by the node.
    pub fn has_skills(&self, node: &Node) -> bool {
        node.skills.is_subset(&self.skills)
    }

    /// Checks whether technician carries all tools required by the node from home.
    pub fn has_tools(&self, node: &Node) -> bool {
        node.tools.is_subset(&self.tools)
    }

    /// Checks whether technician can serve the node at all: missing tools can be picked up at
    /// the main depot.
    pub fn can_serve(&self, node: &Node) -> bool {
        self.has_skills(node) && (self.has_tools(node) || self.depot.is_some())
    }
}
