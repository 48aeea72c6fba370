//! Solution domain models: the tour sequence engine with its schedule caches and a solution
//! which groups tours.

mod error;
pub use self::error::*;

mod patch;
pub use self::patch::TourPatch;

mod schedule;
pub use self::schedule::{ScheduleSummary, ScheduleTiming, VisitSchedule};

mod solution;
pub use self::solution::Solution;

mod tour;
pub use self::tour::{Tour, TourCursor};
