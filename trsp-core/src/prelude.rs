//! This module reimports a common used types.

// Reimport core types
pub use crate::checker::check_solution;
pub use crate::construction::constraints::{ConstraintHandler, MoveConstraint};
pub use crate::construction::costs::{CostDelegate, Detour};
pub use crate::models::common::{Cost, Demand, NodeId, TechnicianId, TimeWindow};
pub use crate::models::problem::{DepotBuilder, Instance, InstanceBuilder, RequestBuilder, TechnicianBuilder};
pub use crate::models::solution::{ScheduleSummary, Solution, Tour, TourError, TourPatch, TourResult};
pub use crate::solver::config::{Config, create_solver_from_config, create_solver_from_config_file, read_config};
pub use crate::solver::search::{Move, MoveKind, SearchContext, SearchStrategy};
pub use crate::solver::Solver;

// Reimport heuristics utils
pub use trsp_heuristics::prelude::compare_floats;
pub use trsp_heuristics::prelude::DefaultRandom;
pub use trsp_heuristics::prelude::Environment;
pub use trsp_heuristics::prelude::GenericError;
pub use trsp_heuristics::prelude::GenericResult;
pub use trsp_heuristics::prelude::InfoLogger;
pub use trsp_heuristics::prelude::Random;
