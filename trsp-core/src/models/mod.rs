//! A collection of models to represent problem and solution in technician routing domain.

pub mod common;
pub mod problem;
pub mod solution;
