//! Core crate contains the main building blocks to evaluate and improve tours of the
//! ***Technician Routing and Scheduling Problem***.
//!
//! # Key points
//!
//! A [Tour](models::solution::Tour) keeps schedule attributes of its nodes (arrival, waiting,
//! slack, load) in a lazily refreshed cache, so a local move is evaluated without mutating the
//! tour and in time proportional to the changed part of the schedule:
//!
//! - **cost delegates** compute the cost change of a move from schedule summaries
//! - **constraints** decide whether a move keeps the solution feasible
//! - **neighborhoods** enumerate candidate moves for the local search
//!
//! The [Solver](solver::Solver) combines them: it builds an initial solution with a construction
//! heuristic and improves it with variable neighborhood descent, sequentially or in parallel.
//!
//! # Examples
//!
//! A solver can be built from a json configuration:
//!
//! ```
//! # use std::io::BufReader;
//! # use std::sync::Arc;
//! use trsp_core::models::problem::*;
//! use trsp_core::solver::config::{create_solver_from_config, read_config};
//! use trsp_core::solver::registry::StrategyRegistry;
//!
//! let transport = create_euclidean_transport_cost(&[(0., 0.), (1., 0.), (2., 0.)])?;
//! let mut builder = InstanceBuilder::new(transport);
//! builder.add_technician(TechnicianBuilder::default().location(0).shift(0., 100.));
//! builder.add_request(RequestBuilder::default().location(1).service_time(1.));
//! builder.add_request(RequestBuilder::default().location(2).service_time(1.));
//! let instance = Arc::new(builder.build()?);
//!
//! let config = read_config(BufReader::new(r#"{ "cost": { "name": "distance" } }"#.as_bytes()))?;
//! let result = create_solver_from_config(instance, &config, &StrategyRegistry::default())?.solve()?;
//!
//! assert_eq!(result.solution.unserved_count(), 0);
//! # Ok::<(), trsp_heuristics::prelude::GenericError>(())
//! ```

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod checker;
pub mod construction;
pub mod models;
pub mod prelude;
pub mod solver;
