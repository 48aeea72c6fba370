#[cfg(test)]
#[path = "../../../tests/unit/construction/costs/detour_test.rs"]
mod detour_test;

use crate::models::common::NodeId;
use crate::models::solution::{Tour, TourError, TourPatch, TourResult};

/// Specifies whether detour nodes are removed from the tour or inserted into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetourKind {
    /// Nodes are inserted between their predecessors and successors.
    Insertion,
    /// Nodes are removed from between their predecessors and successors.
    Removal,
}

/// A node with its neighbours: `pred -> node -> succ`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetourLeg {
    /// A predecessor.
    pub pred: NodeId,
    /// A removed or inserted node.
    pub node: NodeId,
    /// A successor.
    pub succ: NodeId,
}

/// Describes simultaneous removal or insertion of one or two nodes.
///
/// Legs of a detour have to be independent: overlapping or adjacent removals (one removed node is
/// a neighbour of another) and two insertions into the same arc are rejected with a precondition
/// error. Such changes should be evaluated as a tour patch instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Detour {
    /// Detour kind.
    pub kind: DetourKind,
    /// The first leg.
    pub first: DetourLeg,
    /// An optional second leg.
    pub second: Option<DetourLeg>,
}

impl Detour {
    /// Creates insertion of `node` between `pred` and `succ`.
    pub fn insertion(pred: NodeId, node: NodeId, succ: NodeId) -> Self {
        Self { kind: DetourKind::Insertion, first: DetourLeg { pred, node, succ }, second: None }
    }

    /// Creates removal of `node` from between `pred` and `succ`.
    pub fn removal(pred: NodeId, node: NodeId, succ: NodeId) -> Self {
        Self { kind: DetourKind::Removal, first: DetourLeg { pred, node, succ }, second: None }
    }

    /// Adds the second leg of the same kind.
    pub fn with_second(mut self, pred: NodeId, node: NodeId, succ: NodeId) -> Self {
        self.second = Some(DetourLeg { pred, node, succ });
        self
    }

    /// Returns all legs.
    pub fn legs(&self) -> impl Iterator<Item = &DetourLeg> + '_ {
        std::iter::once(&self.first).chain(self.second.iter())
    }

    /// Checks detour against the tour structure.
    pub fn validate(&self, tour: &Tour) -> TourResult<()> {
        self.locate(tour).map(|_| ())
    }

    /// Converts detour into a tour patch.
    pub fn to_patch(&self, tour: &Tour) -> TourResult<TourPatch> {
        let (first, second) = self.locate(tour)?;
        let nodes = tour.nodes();

        Ok(match (self.kind, second) {
            (DetourKind::Removal, None) => TourPatch::removal(first.0),
            (DetourKind::Insertion, None) => TourPatch::insertion(first.0, first.1),
            (DetourKind::Removal, Some(second)) => {
                TourPatch::new(first.0, second.0 + 1, nodes[first.0 + 1..second.0].iter().copied())
            }
            (DetourKind::Insertion, Some(second)) => TourPatch::new(
                first.0,
                second.0,
                std::iter::once(first.1).chain(nodes[first.0..second.0].iter().copied()).chain(std::iter::once(second.1)),
            ),
        })
    }

    /// Returns legs as pairs of position and node ordered by position. For removal, it is the
    /// position of removed node, for insertion, the position the node is inserted before.
    fn locate(&self, tour: &Tour) -> TourResult<Located> {
        let first = self.locate_leg(tour, &self.first)?;
        let Some(second) = self.second.as_ref() else { return Ok((first, None)) };
        let second = self.locate_leg(tour, second)?;

        let (first, second) = if first.0 <= second.0 { (first, second) } else { (second, first) };

        if first.1 == second.1 {
            return Err(TourError::precondition(format!("node {} is used in both legs", first.1)));
        }

        let is_dependent = match self.kind {
            DetourKind::Removal => second.0 - first.0 < 2,
            DetourKind::Insertion => first.0 == second.0,
        };

        if is_dependent {
            return Err(TourError::precondition(format!("detour legs of {} and {} overlap", first.1, second.1)));
        }

        Ok((first, Some(second)))
    }

    fn locate_leg(&self, tour: &Tour, leg: &DetourLeg) -> TourResult<(usize, NodeId)> {
        if !tour.instance().is_request(leg.node) {
            return Err(TourError::precondition(format!("node {} is not a request", leg.node)));
        }

        let position = match self.kind {
            DetourKind::Removal => {
                let position = tour.position_of(leg.node)?;
                let is_consecutive = position > 0
                    && tour.get(position - 1) == Some(leg.pred)
                    && tour.get(position + 1) == Some(leg.succ);

                if !is_consecutive {
                    return Err(TourError::precondition(format!(
                        "nodes {} -> {} -> {} are not consecutive",
                        leg.pred, leg.node, leg.succ
                    )));
                }

                position
            }
            DetourKind::Insertion => {
                if tour.contains(leg.node) {
                    return Err(TourError::AlreadyInTour(leg.node));
                }

                let position = tour.position_of(leg.pred)? + 1;
                if tour.get(position) != Some(leg.succ) {
                    return Err(TourError::precondition(format!("arc {} -> {} does not exist", leg.pred, leg.succ)));
                }

                position
            }
        };

        Ok((position, leg.node))
    }
}

type Located = ((usize, NodeId), Option<(usize, NodeId)>);
