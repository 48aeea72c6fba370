use super::*;
use crate::models::common::Cost;
use crate::models::solution::ScheduleSummary;

fn strategy(name: &str, params: &[(&str, f64)]) -> StrategyConfig {
    StrategyConfig { name: name.to_string(), params: params.iter().map(|(key, value)| (key.to_string(), *value)).collect() }
}

struct FixedCost;

impl CostDelegate for FixedCost {
    fn name(&self) -> &str {
        "fixed"
    }

    fn evaluate_summary(&self, _: &ScheduleSummary) -> Cost {
        42.
    }
}

#[test]
fn can_create_default_strategies() {
    let registry = StrategyRegistry::default();

    ["distance", "duration", "working-time", "schedule", "tour-balance"].into_iter().for_each(|name| {
        let cost = registry.create_cost(&strategy(name, &[])).expect("cannot create cost");
        assert_eq!(cost.name(), name);
    });
    ["time-window", "capacity", "skills", "fixed-nodes"].into_iter().for_each(|name| {
        let constraint = registry.create_constraint(&strategy(name, &[])).expect("cannot create constraint");
        assert_eq!(constraint.name(), name);
    });
    ["relocate", "swap", "two-opt", "or-opt", "string-exchange", "depot-trip"].into_iter().for_each(|name| {
        let neighborhood = registry.create_neighborhood(&strategy(name, &[])).expect("cannot create neighborhood");
        assert_eq!(neighborhood.name(), name);
    });
}

#[test]
fn can_use_strategy_params() {
    let registry = StrategyRegistry::default();

    let constraint = registry.create_constraint(&strategy("max-duration", &[("limit", 480.)])).unwrap();
    assert_eq!(constraint.name(), "max-duration");

    let cost = registry.create_cost(&strategy("schedule", &[("latenessWeight", 0.)])).unwrap();
    assert_eq!(cost.name(), "schedule");

    let cost = registry.create_cost(&strategy("tour-balance", &[("weight", 2.)])).unwrap();
    assert_eq!(cost.name(), "tour-balance");
    assert!(registry.create_cost(&strategy("tour-balance", &[("weight", -2.)])).is_err());

    assert!(registry.create_neighborhood(&strategy("or-opt", &[("maxLength", 5.)])).is_ok());
}

parameterized_test! {can_reject_invalid_params, (name, params, expected), {
    can_reject_invalid_params_impl(name, params, expected);
}}

can_reject_invalid_params! {
    case01_negative: ("string-exchange", &[("maxLength", -1.)], "cannot create neighborhood 'string-exchange': parameter 'maxLength' must be non-negative"),
    case02_infinite: ("or-opt", &[("maxLength", f64::INFINITY)], "cannot create neighborhood 'or-opt': parameter 'maxLength' must be non-negative"),
    case03_unknown: ("three-opt", &[("maxLength", 3.)], "unknown neighborhood: 'three-opt'"),
}

fn can_reject_invalid_params_impl(name: &str, params: &[(&str, f64)], expected: &str) {
    let result = StrategyRegistry::default().create_neighborhood(&strategy(name, params));

    assert_eq!(result.err().map(|err| err.to_string()), Some(expected.to_string()));
}

#[test]
fn can_register_custom_strategy() {
    let mut registry = StrategyRegistry::empty();
    assert!(registry.create_cost(&strategy("fixed", &[])).is_err());

    registry.register_cost("fixed", |_| Ok(Arc::new(FixedCost)));

    let cost = registry.create_cost(&strategy("fixed", &[])).expect("cannot create cost");
    assert_eq!(cost.name(), "fixed");
    assert_eq!(cost.evaluate_summary(&ScheduleSummary::default()), 42.);
}

#[test]
fn can_replace_default_strategy() {
    let mut registry = StrategyRegistry::default();

    registry.register_cost("distance", |_| Ok(Arc::new(FixedCost)));

    assert_eq!(registry.create_cost(&strategy("distance", &[])).unwrap().name(), "fixed");
}
