use super::*;
use crate::helpers::models::problem::*;

fn parse_config(json: &str) -> GenericResult<Config> {
    read_config(BufReader::new(json.as_bytes()))
}

fn create_solver(json: &str) -> GenericResult<Solver> {
    create_solver_from_config_file(create_random_instance(0, 2, 10), BufReader::new(json.as_bytes()), &StrategyRegistry::default())
}

#[test]
fn can_read_full_config() {
    let config = parse_config(
        r#"
        {
          "cost": { "name": "schedule", "params": { "latenessWeight": 10 } },
          "unservedPenalty": 1000,
          "constraints": [
            { "name": "time-window" },
            { "name": "max-duration", "params": { "limit": 480 } }
          ],
          "construction": { "type": "clarke-wright", "kMax": 3 },
          "search": {
            "neighborhoods": [{ "name": "relocate" }, { "name": "or-opt", "params": { "maxLength": 4 } }],
            "strategy": "best-improvement",
            "maxIterations": 100,
            "maxTimeMs": 5000,
            "parallel": true
          },
          "telemetry": { "logging": { "enabled": true, "verbose": false } }
        }
        "#,
    )
    .expect("cannot read config");

    let cost = config.cost.as_ref().unwrap();
    assert_eq!(cost.name, "schedule");
    assert_eq!(cost.params.get("latenessWeight"), Some(&10.));
    assert_eq!(config.unserved_penalty, Some(1000.));
    assert_eq!(config.constraints.as_ref().map(|constraints| constraints.len()), Some(2));
    assert!(matches!(config.construction, Some(ConstructionConfig::ClarkeWright { k_max: Some(3) })));

    let search = config.search.as_ref().unwrap();
    assert_eq!(search.neighborhoods.as_ref().map(|neighborhoods| neighborhoods.len()), Some(2));
    assert_eq!(search.strategy, Some(SearchStrategy::BestImprovement));
    assert_eq!(search.max_iterations, Some(100));
    assert_eq!(search.max_time_ms, Some(5000));
    assert_eq!(search.parallel, Some(true));

    let logging = config.telemetry.as_ref().and_then(|telemetry| telemetry.logging.as_ref()).unwrap();
    assert!(logging.enabled);
    assert_eq!(logging.verbose, Some(false));
}

#[test]
fn can_create_search_context_with_defaults() {
    let config = parse_config("{}").unwrap();

    let context = create_search_context(&config, &StrategyRegistry::default()).expect("cannot create context");

    assert_eq!(context.cost.name(), "duration");
    assert_eq!(context.cost.unserved_penalty(), 0.);
    assert_eq!(context.constraints.names().collect::<Vec<_>>(), vec!["time-window", "capacity", "skills"]);
    assert_eq!(context.strategy, SearchStrategy::FirstImprovement);
    assert!(context.environment.quota.is_none());
    assert!(!context.environment.is_verbose);
}

#[test]
fn can_create_search_context_from_config() {
    let config = parse_config(
        r#"{
          "cost": { "name": "distance" },
          "unservedPenalty": 50,
          "constraints": [{ "name": "fixed-nodes" }, { "name": "skills" }],
          "search": { "strategy": "best-improvement", "maxTimeMs": 1000 },
          "telemetry": { "logging": { "enabled": true, "verbose": true } }
        }"#,
    )
    .unwrap();

    let context = create_search_context(&config, &StrategyRegistry::default()).expect("cannot create context");

    assert_eq!(context.cost.name(), "distance");
    assert_eq!(context.cost.unserved_penalty(), 50.);
    assert_eq!(context.constraints.names().collect::<Vec<_>>(), vec!["fixed-nodes", "skills"]);
    assert_eq!(context.strategy, SearchStrategy::BestImprovement);
    assert!(context.environment.quota.is_some());
    assert!(context.environment.is_verbose);
}

#[test]
fn can_ignore_verbose_when_logging_is_disabled() {
    let config = parse_config(r#"{ "telemetry": { "logging": { "enabled": false, "verbose": true } } }"#).unwrap();

    let context = create_search_context(&config, &StrategyRegistry::default()).unwrap();

    assert!(!context.environment.is_verbose);
}

parameterized_test! {can_reject_invalid_config, (json, expected), {
    can_reject_invalid_config_impl(json, expected);
}}

can_reject_invalid_config! {
    case01_negative_penalty: (r#"{ "unservedPenalty": -1 }"#, "unserved penalty cannot be negative"),
    case02_unknown_cost: (r#"{ "cost": { "name": "fuel" } }"#, "unknown cost: 'fuel'"),
    case03_unknown_constraint: (r#"{ "constraints": [{ "name": "breaks" }] }"#, "unknown constraint: 'breaks'"),
    case04_unknown_neighborhood: (
        r#"{ "search": { "neighborhoods": [{ "name": "cross" }] } }"#,
        "unknown neighborhood: 'cross'"
    ),
    case05_missing_param: (
        r#"{ "constraints": [{ "name": "max-duration" }] }"#,
        "cannot create constraint 'max-duration': max-duration requires limit"
    ),
    case06_negative_param: (
        r#"{ "cost": { "name": "schedule", "params": { "latenessWeight": -2 } } }"#,
        "cannot create cost 'schedule': parameter 'latenessWeight' must be non-negative"
    ),
}

fn can_reject_invalid_config_impl(json: &str, expected: &str) {
    let result = create_solver(json);

    match result {
        Err(err) => assert_eq!(err.to_string(), expected),
        Ok(_) => unreachable!("expected error: {expected}"),
    }
}

#[test]
fn can_reject_malformed_config() {
    let result = parse_config(r#"{ "search": { "strategy": "random-improvement" } }"#);

    assert!(result.is_err_and(|err| err.to_string().starts_with("cannot deserialize config: '")));
}

#[test]
fn can_create_solver_with_construction() {
    let solver = create_solver(r#"{ "construction": { "type": "clarke-wright" }, "search": { "maxIterations": 0 } }"#)
        .expect("cannot create solver");

    let result = solver.solve().expect("cannot solve");

    assert_eq!(result.iterations, 0);
    assert_eq!(result.termination, crate::solver::search::Termination::Budget);
}
