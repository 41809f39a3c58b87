//! Tests for builder modules

use slot_orchestrator::builders::{build_engine, EngineBuilder};
use slot_orchestrator::config::SimulationConfig;
use slot_orchestrator::core::{SchedulerError, SharedAuditSink, TransactionRequest};

#[test]
fn test_engine_builder_from_config() {
    let config = SimulationConfig::default()
        .with_slot_count(12)
        .with_slot_capacity(5000)
        .with_group_preserving(true);

    let builder = EngineBuilder::new(config);
    assert_eq!(builder.config().slot_count, 12);

    let engine = builder.build().expect("valid config");
    assert_eq!(engine.slot_count(), 12);
    assert_eq!(engine.capacity(), 5000);
    assert!(engine.group_preserving());
    assert_eq!(engine.current_slot(), 0);
}

#[test]
fn test_engine_builder_rejects_invalid() {
    let result = EngineBuilder::new(SimulationConfig::default().with_slot_capacity(0)).build();
    assert!(matches!(result, Err(SchedulerError::InvalidConfig(_))));
}

#[test]
fn test_engine_builder_with_audit() {
    let sink = SharedAuditSink::new();
    let mut engine = EngineBuilder::new(SimulationConfig::default())
        .with_audit(Box::new(sink.clone()))
        .build()
        .unwrap();

    engine.create_transaction(&TransactionRequest::jit(100, 2));
    let actions: Vec<_> = sink.events().into_iter().map(|e| e.action).collect();
    assert_eq!(actions, vec!["create", "place"]);
}

#[test]
fn test_build_engine_from_json() {
    let engine = build_engine(r#"{ "slot_count": 8, "external_load": { "enabled": true, "percent": 25 } }"#)
        .expect("valid json");
    assert_eq!(engine.slot_count(), 8);
    assert!(engine.window().iter().all(|s| s.external_used == 12_000));
}
