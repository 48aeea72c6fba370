use trsp_heuristics::prelude::Float;

/// Represents a time duration.
pub type Duration = Float;

/// Represents a timestamp.
pub type Timestamp = Float;

/// Represents a distance.
pub type Distance = Float;

/// Specifies cost value.
pub type Cost = Float;

/// Specifies location type: an index in the transport matrix.
pub type Location = usize;

/// Specifies node id type. Node ids are dense and stable for the lifetime of an instance.
pub type NodeId = usize;

/// Specifies technician id type: an index in the fleet.
pub type TechnicianId = usize;
