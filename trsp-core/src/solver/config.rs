//! Solver configuration.

#[cfg(test)]
#[path = "../../tests/unit/solver/config_test.rs"]
mod config_test;

use super::registry::{StrategyParams, StrategyRegistry};
use super::search::{LocalSearch, SearchContext, SearchStrategy};
use super::Solver;
use crate::construction::constraints::ConstraintHandler;
use crate::construction::costs::{CostDelegate, UnservedPenalty};
use crate::construction::heuristics::{CheapestInsertion, ClarkeWright, Construction};
use crate::models::problem::Instance;
use serde::Deserialize;
use std::io::{BufReader, Read};
use std::sync::Arc;
use trsp_heuristics::prelude::*;

/// A solver configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Specifies cost delegate. Default is `duration`.
    pub cost: Option<StrategyConfig>,
    /// Specifies penalty per unserved request. Default is no penalty.
    pub unserved_penalty: Option<f64>,
    /// Specifies constraints in check order. Default is time window, capacity and skills.
    pub constraints: Option<Vec<StrategyConfig>>,
    /// Specifies construction heuristic. Default is cheapest insertion.
    pub construction: Option<ConstructionConfig>,
    /// Specifies local search configuration.
    pub search: Option<SearchConfig>,
    /// Specifies telemetry configuration.
    pub telemetry: Option<TelemetryConfig>,
}

/// A named strategy with its numeric parameters.
#[derive(Clone, Deserialize, Debug)]
pub struct StrategyConfig {
    /// Strategy name in the registry.
    pub name: String,
    /// Strategy parameters.
    #[serde(default)]
    pub params: StrategyParams,
}

/// A construction heuristic configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum ConstructionConfig {
    /// Cheapest insertion heuristic.
    #[serde(rename(deserialize = "cheapest-insertion"))]
    CheapestInsertion,

    /// Randomized Clarke and Wright savings heuristic.
    #[serde(rename(deserialize = "clarke-wright"))]
    #[serde(rename_all = "camelCase")]
    ClarkeWright {
        /// Amount of best arcs to pick a merge from. Default is 1.
        k_max: Option<usize>,
    },
}

/// A local search configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    /// Neighborhoods in exploration order. Default is relocate, swap, two-opt, or-opt and string-exchange.
    pub neighborhoods: Option<Vec<StrategyConfig>>,
    /// Move acceptance strategy. Default is first improvement.
    pub strategy: Option<SearchStrategy>,
    /// Max amount of applied moves.
    pub max_iterations: Option<usize>,
    /// Max running time in milliseconds.
    pub max_time_ms: Option<u64>,
    /// Specifies whether neighborhoods are explored in parallel. Default is false.
    pub parallel: Option<bool>,
}

/// A telemetry configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryConfig {
    /// Logging configuration.
    pub logging: Option<LoggingConfig>,
}

/// A logging configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Specifies whether logging is enabled.
    pub enabled: bool,
    /// Specifies whether rejected and applied moves are logged. Default is false.
    pub verbose: Option<bool>,
}

/// Reads config from reader.
pub fn read_config<R: Read>(reader: BufReader<R>) -> GenericResult<Config> {
    serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize config: '{err}'").into())
}

/// Creates a solver from config file.
pub fn create_solver_from_config_file<R: Read>(
    instance: Arc<Instance>,
    reader: BufReader<R>,
    registry: &StrategyRegistry,
) -> GenericResult<Solver> {
    read_config(reader).and_then(|config| create_solver_from_config(instance, &config, registry))
}

/// Creates a solver from config.
pub fn create_solver_from_config(
    instance: Arc<Instance>,
    config: &Config,
    registry: &StrategyRegistry,
) -> GenericResult<Solver> {
    let context = create_search_context(config, registry)?;
    let construction = create_construction(config.construction.as_ref());
    let local_search = create_local_search(config.search.as_ref(), registry)?;

    Ok(Solver::new(instance, context, construction, local_search))
}

/// Creates a search context: cost delegate, constraints and environment.
pub fn create_search_context(config: &Config, registry: &StrategyRegistry) -> GenericResult<SearchContext> {
    let cost = match config.cost.as_ref() {
        Some(cost) => registry.create_cost(cost)?,
        None => registry.create_cost(&default_strategy("duration"))?,
    };
    let cost: Arc<dyn CostDelegate + Send + Sync> = match config.unserved_penalty {
        Some(penalty) if penalty < 0. => return Err("unserved penalty cannot be negative".into()),
        Some(penalty) => Arc::new(UnservedPenalty::new(cost, penalty)),
        None => cost,
    };

    let constraints = match config.constraints.as_ref() {
        Some(constraints) => {
            constraints.iter().map(|constraint| registry.create_constraint(constraint)).collect::<GenericResult<Vec<_>>>()
        }
        None => ["time-window", "capacity", "skills"]
            .into_iter()
            .map(|name| registry.create_constraint(&default_strategy(name)))
            .collect::<GenericResult<Vec<_>>>(),
    }?;

    Ok(SearchContext {
        cost,
        constraints: ConstraintHandler::new(constraints),
        strategy: config.search.as_ref().and_then(|search| search.strategy).unwrap_or_default(),
        environment: Arc::new(create_environment(config)),
    })
}

fn create_environment(config: &Config) -> Environment {
    let logging = config.telemetry.as_ref().and_then(|telemetry| telemetry.logging.as_ref());
    let (is_enabled, is_verbose) =
        logging.map_or((false, false), |logging| (logging.enabled, logging.enabled && logging.verbose.unwrap_or(false)));

    let logger: InfoLogger = if is_enabled { Arc::new(|msg: &str| println!("{msg}")) } else { Arc::new(|_: &str| {}) };
    let quota = config.search.as_ref().and_then(|search| search.max_time_ms).map::<Arc<dyn Quota + Send + Sync>, _>(
        |limit| Arc::new(TimeQuota::new(limit as f64 / 1000.)),
    );

    Environment::new(Arc::new(DefaultRandom::default()), quota, Parallelism::default(), logger, is_verbose)
}

fn create_construction(config: Option<&ConstructionConfig>) -> Arc<dyn Construction + Send + Sync> {
    match config {
        Some(ConstructionConfig::ClarkeWright { k_max }) => Arc::new(ClarkeWright::new(k_max.unwrap_or(1))),
        Some(ConstructionConfig::CheapestInsertion) | None => Arc::new(CheapestInsertion),
    }
}

fn create_local_search(config: Option<&SearchConfig>, registry: &StrategyRegistry) -> GenericResult<LocalSearch> {
    let neighborhoods = match config.and_then(|search| search.neighborhoods.as_ref()) {
        Some(neighborhoods) => neighborhoods
            .iter()
            .map(|neighborhood| registry.create_neighborhood(neighborhood))
            .collect::<GenericResult<Vec<_>>>(),
        None => ["relocate", "swap", "two-opt", "or-opt", "string-exchange"]
            .into_iter()
            .map(|name| registry.create_neighborhood(&default_strategy(name)))
            .collect::<GenericResult<Vec<_>>>(),
    }?;

    Ok(LocalSearch::new(neighborhoods)
        .with_max_iterations(config.and_then(|search| search.max_iterations))
        .with_parallel(config.and_then(|search| search.parallel).unwrap_or(false)))
}

fn default_strategy(name: &str) -> StrategyConfig {
    StrategyConfig { name: name.to_string(), params: Default::default() }
}
