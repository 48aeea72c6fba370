//! This module contains building blocks to evaluate and construct solutions.
//!
//! # Evaluation
//!
//! Cost delegates evaluate tours and moves, constraints decide whether a move keeps the solution
//! feasible. Both work on schedule summaries of non-materialized tour changes.
//!
//! # Construction
//!
//! Construction heuristics are popular methods to find quickly a **feasible** solution, but
//! without a guarantee of good quality. It is then improved by local search.

pub mod constraints;
pub mod costs;
pub mod heuristics;
