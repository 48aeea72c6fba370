use crate::models::common::NodeId;
use tinyvec::TinyVec;

/// Describes a tour change as a replacement of the position window `[start, end)` with the given
/// nodes. Every local move is expressed by at most one patch per affected tour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TourPatch {
    /// First replaced position.
    pub start: usize,
    /// Position after the last replaced one.
    pub end: usize,
    /// New nodes placed instead of the window.
    pub nodes: TinyVec<[NodeId; 6]>,
}

impl TourPatch {
    /// Creates a new instance of `TourPatch`.
    pub fn new(start: usize, end: usize, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        Self { start, end, nodes: nodes.into_iter().collect() }
    }

    /// Creates a patch which inserts a node before given position.
    pub fn insertion(position: usize, node: NodeId) -> Self {
        Self::new(position, position, std::iter::once(node))
    }

    /// Creates a patch which removes a node at given position.
    pub fn removal(position: usize) -> Self {
        Self::new(position, position + 1, std::iter::empty())
    }

    /// Returns change of the tour size after applying the patch.
    pub fn size_change(&self) -> isize {
        self.nodes.len() as isize - (self.end - self.start) as isize
    }
}
