use crate::models::common::NodeId;
use trsp_heuristics::prelude::GenericError;

/// A structural error: a query or a move references a structure which does not exist. It
/// indicates a defect in the calling code and is propagated, never silently recovered.
/// Infeasibility is not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TourError {
    /// A node is not visited by the tour.
    NotInTour(NodeId),
    /// A node is already visited by the tour.
    AlreadyInTour(NodeId),
    /// An operation requires a non-empty tour.
    EmptyTour,
    /// A claimed structural precondition is false, e.g. nodes are not adjacent as claimed.
    Precondition(String),
    /// A tour was modified while a cursor over it was open.
    ConcurrentModification,
}

/// A type alias for result type with `TourError`.
pub type TourResult<T> = Result<T, TourError>;

impl TourError {
    /// Creates a precondition error.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }
}

impl std::fmt::Display for TourError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TourError::NotInTour(id) => write!(f, "node {id} is not in tour"),
            TourError::AlreadyInTour(id) => write!(f, "node {id} is already in tour"),
            TourError::EmptyTour => write!(f, "tour is empty"),
            TourError::Precondition(message) => write!(f, "precondition violated: {message}"),
            TourError::ConcurrentModification => write!(f, "tour was modified while being iterated"),
        }
    }
}

impl std::error::Error for TourError {}

impl From<TourError> for GenericError {
    fn from(value: TourError) -> Self {
        GenericError::from(value.to_string())
    }
}
