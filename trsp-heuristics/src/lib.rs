//! This crate exposes problem agnostic helper functionality which is used to build a local search
//! solver for technician routing: random numbers, fork-join parallelism, cooperative quotas,
//! timing and execution environment.

#![warn(missing_docs)]

pub mod prelude;
pub mod quota;
pub mod utils;
