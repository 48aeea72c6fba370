//! A registry of named strategies: cost delegates, constraints and neighborhoods. It is used to
//! create them from configuration and is open for user defined strategies.

#[cfg(test)]
#[path = "../../tests/unit/solver/registry_test.rs"]
mod registry_test;

use super::config::StrategyConfig;
use super::search::neighborhoods::*;
use crate::construction::constraints::*;
use crate::construction::costs::*;
use rustc_hash::FxHashMap;
use std::collections::HashMap;
use std::sync::Arc;
use trsp_heuristics::prelude::*;

/// Strategy parameters by name.
pub type StrategyParams = HashMap<String, f64>;

/// Creates a strategy from its parameters.
pub type StrategyFactory<T> = Arc<dyn Fn(&StrategyParams) -> GenericResult<Arc<T>> + Send + Sync>;

/// Keeps strategy factories by name.
pub struct StrategyRegistry {
    costs: FxHashMap<String, StrategyFactory<dyn CostDelegate + Send + Sync>>,
    constraints: FxHashMap<String, StrategyFactory<dyn MoveConstraint + Send + Sync>>,
    neighborhoods: FxHashMap<String, StrategyFactory<dyn Neighborhood + Send + Sync>>,
}

impl StrategyRegistry {
    /// Creates a registry without any strategy.
    pub fn empty() -> Self {
        Self { costs: Default::default(), constraints: Default::default(), neighborhoods: Default::default() }
    }

    /// Registers cost delegate factory. Replaces existing one with the same name.
    pub fn register_cost<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&StrategyParams) -> GenericResult<Arc<dyn CostDelegate + Send + Sync>> + Send + Sync + 'static,
    {
        self.costs.insert(name.to_string(), Arc::new(factory));
    }

    /// Registers constraint factory. Replaces existing one with the same name.
    pub fn register_constraint<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&StrategyParams) -> GenericResult<Arc<dyn MoveConstraint + Send + Sync>> + Send + Sync + 'static,
    {
        self.constraints.insert(name.to_string(), Arc::new(factory));
    }

    /// Registers neighborhood factory. Replaces existing one with the same name.
    pub fn register_neighborhood<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&StrategyParams) -> GenericResult<Arc<dyn Neighborhood + Send + Sync>> + Send + Sync + 'static,
    {
        self.neighborhoods.insert(name.to_string(), Arc::new(factory));
    }

    /// Creates cost delegate.
    pub fn create_cost(&self, config: &StrategyConfig) -> GenericResult<Arc<dyn CostDelegate + Send + Sync>> {
        create(&self.costs, "cost", config)
    }

    /// Creates constraint.
    pub fn create_constraint(&self, config: &StrategyConfig) -> GenericResult<Arc<dyn MoveConstraint + Send + Sync>> {
        create(&self.constraints, "constraint", config)
    }

    /// Creates neighborhood.
    pub fn create_neighborhood(&self, config: &StrategyConfig) -> GenericResult<Arc<dyn Neighborhood + Send + Sync>> {
        create(&self.neighborhoods, "neighborhood", config)
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();

        registry.register_cost("distance", |_| Ok(Arc::new(DistanceCost)));
        registry.register_cost("duration", |_| Ok(Arc::new(DurationCost)));
        registry.register_cost("working-time", |_| Ok(Arc::new(WorkingTimeCost)));
        registry.register_cost("schedule", |params| {
            Ok(Arc::new(ScheduleCost::new(get_non_negative(params, "latenessWeight", 1.)?)))
        });
        registry.register_cost("tour-balance", |params| {
            Ok(Arc::new(TourBalance::new(Arc::new(WorkingTimeCost), get_non_negative(params, "weight", 1.)?)))
        });

        registry.register_constraint("time-window", |_| Ok(Arc::new(TimeWindowConstraint)));
        registry.register_constraint("capacity", |_| Ok(Arc::new(CapacityConstraint)));
        registry.register_constraint("skills", |_| Ok(Arc::new(SkillsConstraint)));
        registry.register_constraint("fixed-nodes", |_| Ok(Arc::new(FixedNodesConstraint)));
        registry.register_constraint("max-duration", |params| {
            let limit = params.get("limit").copied().ok_or_else(|| GenericError::from("max-duration requires limit"))?;
            Ok(Arc::new(MaxDurationConstraint::new(limit)))
        });

        registry.register_neighborhood("relocate", |_| Ok(Arc::new(Relocate)));
        registry.register_neighborhood("swap", |_| Ok(Arc::new(Swap)));
        registry.register_neighborhood("two-opt", |_| Ok(Arc::new(TwoOpt)));
        registry.register_neighborhood("depot-trip", |_| Ok(Arc::new(DepotTrip)));
        registry.register_neighborhood("or-opt", |params| {
            Ok(Arc::new(OrOpt::new(get_non_negative(params, "maxLength", 3.)? as usize)))
        });
        registry.register_neighborhood("string-exchange", |params| {
            Ok(Arc::new(StringExchange::new(get_non_negative(params, "maxLength", 2.)? as usize)))
        });

        registry
    }
}

fn create<T: ?Sized>(
    factories: &FxHashMap<String, StrategyFactory<T>>,
    kind: &str,
    config: &StrategyConfig,
) -> GenericResult<Arc<T>> {
    let factory = factories.get(&config.name).ok_or_else(|| format!("unknown {kind}: '{}'", config.name))?;

    factory(&config.params).map_err(|err| err.with_context(&format!("cannot create {kind} '{}'", config.name)))
}

fn get_non_negative(params: &StrategyParams, key: &str, default: f64) -> GenericResult<f64> {
    match params.get(key).copied() {
        Some(value) if value < 0. || !value.is_finite() => Err(format!("parameter '{key}' must be non-negative").into()),
        Some(value) => Ok(value),
        None => Ok(default),
    }
}
