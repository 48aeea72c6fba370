#[cfg(test)]
#[path = "../../../tests/unit/solver/search/moves_test.rs"]
mod moves_test;

use crate::models::common::{Cost, NodeId, TechnicianId};
use crate::models::solution::{ScheduleSummary, Solution, Tour, TourError, TourPatch, TourResult};

/// Specifies a local search move by tours and positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// Inserts unserved request before given position.
    Insert {
        /// Target tour.
        tour: TechnicianId,
        /// Inserted request.
        node: NodeId,
        /// Position before which the request is inserted.
        position: usize,
    },
    /// Inserts unserved request before given position together with a preceding visit of the
    /// technician depot.
    InsertWithDepot {
        /// Target tour.
        tour: TechnicianId,
        /// Inserted request.
        node: NodeId,
        /// Position before which the depot and the request are inserted.
        position: usize,
    },
    /// Removes request from the tour making it unserved. Removing a depot visit keeps served
    /// requests unchanged.
    Remove {
        /// Source tour.
        tour: TechnicianId,
        /// Position of removed request.
        position: usize,
    },
    /// Moves one request to another position of the same or another tour.
    Relocate {
        /// Source tour.
        from_tour: TechnicianId,
        /// Position of the request.
        from: usize,
        /// Target tour.
        to_tour: TechnicianId,
        /// Position in the target tour (before the move) where the request is inserted before.
        to: usize,
    },
    /// Exchanges two requests of the same or different tours.
    Swap {
        /// The first tour.
        first_tour: TechnicianId,
        /// Position in the first tour.
        first: usize,
        /// The second tour.
        second_tour: TechnicianId,
        /// Position in the second tour.
        second: usize,
    },
    /// Reverses the segment between positions (both inclusive).
    TwoOpt {
        /// Tour.
        tour: TechnicianId,
        /// Segment start.
        from: usize,
        /// Segment end.
        to: usize,
    },
    /// Moves a short segment to another position of the same or another tour.
    OrOpt {
        /// Source tour.
        from_tour: TechnicianId,
        /// Segment start.
        start: usize,
        /// Segment length.
        length: usize,
        /// Target tour.
        to_tour: TechnicianId,
        /// Position in the target tour (before the move) where the segment is inserted before.
        to: usize,
    },
    /// Exchanges two segments of different tours.
    StringExchange {
        /// The first tour.
        first_tour: TechnicianId,
        /// The first segment start.
        first_start: usize,
        /// The first segment length.
        first_length: usize,
        /// The second tour.
        second_tour: TechnicianId,
        /// The second segment start.
        second_start: usize,
        /// The second segment length.
        second_length: usize,
    },
}

/// A change of one tour caused by a move.
#[derive(Clone, Debug)]
pub struct TourChange {
    /// Changed tour.
    pub tour: TechnicianId,
    /// Tour modification counter at the moment the move was created.
    pub version: usize,
    /// Patch to apply.
    pub patch: TourPatch,
    /// Schedule of the tour after applying the patch.
    pub summary: ScheduleSummary,
}

/// A proposed, not yet applied, move. It is created against a solution state: tour patches and
/// their schedule summaries are calculated once and shared by cost delegates and constraints.
#[derive(Clone, Debug)]
pub struct Move {
    kind: MoveKind,
    changes: Vec<TourChange>,
    moved: Vec<NodeId>,
    served: i32,
    delta: Option<Cost>,
}

impl Move {
    /// Creates a move and evaluates schedules of changed tours. Fails if the move does not match
    /// the solution structure.
    pub fn new(solution: &Solution, kind: MoveKind) -> TourResult<Self> {
        let Resolved { patches, moved, served } = resolve(solution, &kind)?;

        let changes = patches
            .into_iter()
            .map(|(technician, patch)| {
                let tour = solution.get_tour(technician)?;
                let summary = tour.summarize(&patch)?;

                Ok(TourChange { tour: technician, version: tour.version(), patch, summary })
            })
            .collect::<TourResult<Vec<_>>>()?;

        Ok(Self { kind, changes, moved, served, delta: None })
    }

    /// Sets cost delta of the move.
    pub fn with_delta(mut self, delta: Cost) -> Self {
        self.delta = Some(delta);
        self
    }

    /// Returns move kind.
    pub fn kind(&self) -> &MoveKind {
        &self.kind
    }

    /// Returns tour changes.
    pub fn changes(&self) -> &[TourChange] {
        self.changes.as_slice()
    }

    /// Returns nodes which change their tour or their position relative to neighbours.
    pub fn moved_nodes(&self) -> &[NodeId] {
        self.moved.as_slice()
    }

    /// Returns change of served requests amount.
    pub fn served_change(&self) -> i32 {
        self.served
    }

    /// Returns cost delta if it was evaluated.
    pub fn delta(&self) -> Option<Cost> {
        self.delta
    }
}

struct Resolved {
    patches: Vec<(TechnicianId, TourPatch)>,
    moved: Vec<NodeId>,
    served: i32,
}

impl Resolved {
    fn new(patches: Vec<(TechnicianId, TourPatch)>, moved: Vec<NodeId>) -> Self {
        Self { patches, moved, served: 0 }
    }
}

fn resolve(solution: &Solution, kind: &MoveKind) -> TourResult<Resolved> {
    match *kind {
        MoveKind::Insert { tour, node, position } => {
            check_unserved(solution, node)?;

            Ok(Resolved { patches: vec![(tour, TourPatch::insertion(position, node))], moved: vec![], served: 1 })
        }
        MoveKind::InsertWithDepot { tour, node, position } => {
            check_unserved(solution, node)?;

            let source = solution.get_tour(tour)?;
            let depot = source
                .technician()
                .depot
                .ok_or_else(|| TourError::precondition(format!("technician {tour} has no depot")))?;
            if source.is_depot_visited() {
                return Err(TourError::precondition(format!("tour {tour} already visits depot")));
            }

            Ok(Resolved {
                patches: vec![(tour, TourPatch::new(position, position, [depot, node]))],
                moved: vec![],
                served: 1,
            })
        }
        MoveKind::Remove { tour, position } => {
            let node = segment(solution.get_tour(tour)?, position, 1)?[0];
            let served = if solution.instance().is_request(node) { -1 } else { 0 };

            Ok(Resolved { patches: vec![(tour, TourPatch::removal(position))], moved: vec![node], served })
        }
        MoveKind::Relocate { from_tour, from, to_tour, to } => move_segment(solution, from_tour, from, 1, to_tour, to),
        MoveKind::OrOpt { from_tour, start, length, to_tour, to } => {
            move_segment(solution, from_tour, start, length, to_tour, to)
        }
        MoveKind::Swap { first_tour, first, second_tour, second } => {
            if first_tour == second_tour {
                let tour = solution.get_tour(first_tour)?;
                let (first, second) = (first.min(second), first.max(second));

                if first == second {
                    return Err(TourError::precondition("cannot swap a node with itself"));
                }

                let (a, b) = (segment(tour, first, 1)?[0], segment(tour, second, 1)?[0]);
                let nodes = std::iter::once(b)
                    .chain(tour.nodes()[first + 1..second].iter().copied())
                    .chain(std::iter::once(a));

                Ok(Resolved::new(vec![(first_tour, TourPatch::new(first, second + 1, nodes))], vec![a, b]))
            } else {
                let a = transferred_segment(solution.get_tour(first_tour)?, first, 1)?[0];
                let b = transferred_segment(solution.get_tour(second_tour)?, second, 1)?[0];

                Ok(Resolved::new(
                    vec![
                        (first_tour, TourPatch::new(first, first + 1, std::iter::once(b))),
                        (second_tour, TourPatch::new(second, second + 1, std::iter::once(a))),
                    ],
                    vec![a, b],
                ))
            }
        }
        MoveKind::TwoOpt { tour, from, to } => {
            if from >= to {
                return Err(TourError::precondition(format!("invalid segment [{from}, {to}]")));
            }

            let reversed = segment(solution.get_tour(tour)?, from, to - from + 1)?;

            Ok(Resolved::new(
                vec![(tour, TourPatch::new(from, to + 1, reversed.iter().rev().copied()))],
                reversed.to_vec(),
            ))
        }
        MoveKind::StringExchange {
            first_tour,
            first_start,
            first_length,
            second_tour,
            second_start,
            second_length,
        } => {
            if first_tour == second_tour {
                return Err(TourError::precondition("string exchange requires two different tours"));
            }

            let first = transferred_segment(solution.get_tour(first_tour)?, first_start, first_length)?;
            let second = transferred_segment(solution.get_tour(second_tour)?, second_start, second_length)?;

            Ok(Resolved::new(
                vec![
                    (first_tour, TourPatch::new(first_start, first_start + first_length, second.iter().copied())),
                    (second_tour, TourPatch::new(second_start, second_start + second_length, first.iter().copied())),
                ],
                first.iter().chain(second.iter()).copied().collect(),
            ))
        }
    }
}

fn move_segment(
    solution: &Solution,
    from_tour: TechnicianId,
    start: usize,
    length: usize,
    to_tour: TechnicianId,
    to: usize,
) -> TourResult<Resolved> {
    let source = solution.get_tour(from_tour)?;
    let end = start + length;

    if from_tour != to_tour {
        let moved = transferred_segment(source, start, length)?;

        return Ok(Resolved::new(
            vec![
                (from_tour, TourPatch::new(start, end, std::iter::empty())),
                (to_tour, TourPatch::new(to, to, moved.iter().copied())),
            ],
            moved.to_vec(),
        ));
    }

    let moved = segment(source, start, length)?;

    if to == 0 || to >= source.len() {
        return Err(TourError::precondition(format!("insertion position {to} is out of range")));
    }

    let nodes = source.nodes();
    let patch = if to < start {
        TourPatch::new(to, end, moved.iter().chain(nodes[to..start].iter()).copied())
    } else if to > end {
        TourPatch::new(start, to, nodes[end..to].iter().chain(moved.iter()).copied())
    } else {
        return Err(TourError::precondition(format!("segment [{start}, {end}) is already at position {to}")));
    };

    Ok(Resolved::new(vec![(from_tour, patch)], moved.to_vec()))
}

fn check_unserved(solution: &Solution, node: NodeId) -> TourResult<()> {
    if solution.is_unserved(node) {
        Ok(())
    } else {
        Err(TourError::precondition(format!("request {node} is not unserved")))
    }
}

/// Returns a segment which moves to another tour: a depot visit belongs to its technician.
fn transferred_segment(tour: &Tour, start: usize, length: usize) -> TourResult<&[NodeId]> {
    let nodes = segment(tour, start, length)?;

    match nodes.iter().find(|id| tour.instance().is_depot(**id)) {
        Some(depot) => Err(TourError::precondition(format!("depot {depot} cannot leave tour {}", tour.technician_id()))),
        None => Ok(nodes),
    }
}

/// Returns nodes in `[start, start + length)` checking that they are between tour homes.
fn segment(tour: &Tour, start: usize, length: usize) -> TourResult<&[NodeId]> {
    let positions = tour.request_positions();

    if length == 0 || start < positions.start || start + length > positions.end {
        return Err(TourError::precondition(format!(
            "segment [{start}, {}) is outside of tour {} interior",
            start + length,
            tour.technician_id()
        )));
    }

    Ok(&tour.nodes()[start..start + length])
}
