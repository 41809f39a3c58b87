//! Tests for the request surface, scenarios and the tokio driver

use std::time::Duration;

use slot_orchestrator::config::SimulationConfig;
use slot_orchestrator::core::{SlotEngine, TransactionRequest, TransactionStatus};
use slot_orchestrator::runtime::api::{
    advance, apply_config, health, reset, snapshot, submit_burst, submit_transaction,
    DEFAULT_BURST,
};
use slot_orchestrator::runtime::{shared, ConfigUpdate, Scenario, SlotTicker, TokioSpawner};

#[test]
fn test_submit_and_respond() {
    let engine = shared(SlotEngine::new(
        &SimulationConfig::default().with_slot_capacity(1000),
    ));

    let first = submit_transaction(&engine, &TransactionRequest::jit(800, 3)).unwrap();
    let second = submit_transaction(&engine, &TransactionRequest::jit(800, 3)).unwrap();
    assert_eq!(first.status, TransactionStatus::Scheduled);
    assert_eq!(second.scheduled_slot, Some(1));
    assert_eq!(second.retry_count, 1);

    let aot = submit_transaction(&engine, &TransactionRequest::aot(2000, 2, 0)).unwrap();
    assert_eq!(aot.status, TransactionStatus::Abandoned);
}

#[test]
fn test_burst_advance_reset() {
    let engine = shared(SlotEngine::default());
    let ids = submit_burst(&engine, &TransactionRequest::default(), DEFAULT_BURST);
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());

    advance(&engine);
    assert_eq!(health(&engine).current_slot, 1);

    reset(&engine);
    let snap = snapshot(&engine);
    assert_eq!(snap.metrics.current_slot, 0);
    assert!(snap.transactions.is_empty());
}

#[test]
fn test_apply_config_updates() {
    let engine = shared(SlotEngine::default());
    apply_config(&engine, ConfigUpdate::Capacity { capacity: 0 });
    apply_config(&engine, ConfigUpdate::ExternalLoad { enabled: true, percent: 200 });
    apply_config(&engine, ConfigUpdate::GroupPreserving { enabled: true });

    let guard = engine.lock();
    assert_eq!(guard.capacity(), 1);
    assert_eq!(guard.external_load().percent, 100);
    assert!(guard.group_preserving());
}

#[test]
fn test_config_update_serde() {
    let update: ConfigUpdate =
        serde_json::from_str(r#"{ "setting": "external_load", "enabled": true, "percent": 30 }"#)
            .unwrap();
    assert_eq!(update, ConfigUpdate::ExternalLoad { enabled: true, percent: 30 });
}

#[test]
fn test_scenarios_submit_all() {
    let mut engine = SlotEngine::default();
    let ids = Scenario::DexOracle.run(&mut engine);
    assert_eq!(ids.len(), 12);
    // 48000 CU per slot fits all JIT traffic in the current slot.
    assert!(engine.backlog().is_empty());
    let aot = engine.transaction(11).unwrap();
    assert_eq!(aot.scheduled_slot, Some(5));

    let ids = Scenario::HftBurst.run(&mut engine);
    assert_eq!(ids.len(), 30);
    assert_eq!(engine.registry().len(), 42);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_ticker_advances_and_pauses() {
    let engine = shared(SlotEngine::default());
    let spawner = TokioSpawner::current().expect("inside a runtime");
    let mut ticker = SlotTicker::new(engine.clone(), spawner);

    ticker.play(50);
    assert!(ticker.is_playing());
    tokio::time::sleep(Duration::from_millis(400)).await;
    ticker.pause();
    assert!(!ticker.is_playing());

    // let any tick that was already running finish
    tokio::time::sleep(Duration::from_millis(100)).await;
    let paused_at = engine.lock().current_slot();
    assert!(paused_at >= 2, "expected several ticks, got {paused_at}");
    assert_eq!(ticker.ticks(), paused_at);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(engine.lock().current_slot(), paused_at);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_ticker_reruns_jit_backlog() {
    let engine = shared(SlotEngine::new(
        &SimulationConfig::default().with_slot_count(2).with_slot_capacity(1000),
    ));
    let blocked = submit_transaction(&engine, &TransactionRequest::jit(1000, 5)).unwrap();
    let waiting = submit_transaction(&engine, &TransactionRequest::jit(1000, 5)).unwrap();
    let late = submit_transaction(&engine, &TransactionRequest::jit(1000, 5)).unwrap();
    assert_eq!(blocked.scheduled_slot, Some(0));
    assert_eq!(waiting.scheduled_slot, Some(1));
    assert_eq!(late.scheduled_slot, None);

    let mut ticker = SlotTicker::new(engine.clone(), TokioSpawner::current().unwrap());
    ticker.play(50);
    tokio::time::sleep(Duration::from_millis(250)).await;
    ticker.pause();

    let guard = engine.lock();
    assert_eq!(guard.transaction(late.id).unwrap().scheduled_slot, Some(2));
    assert!(guard.backlog().is_empty());
}

#[test]
fn test_ticker_on_owned_runtime() {
    let engine = shared(SlotEngine::default());
    let spawner = TokioSpawner::with_worker_threads(1).expect("runtime builds");
    let mut ticker = SlotTicker::new(engine.clone(), spawner);

    ticker.play(50);
    std::thread::sleep(Duration::from_millis(300));
    ticker.pause();
    std::thread::sleep(Duration::from_millis(100));

    let stopped_at = engine.lock().current_slot();
    assert!(stopped_at >= 2, "expected several ticks, got {stopped_at}");
    assert_eq!(ticker.ticks(), stopped_at);
    drop(ticker);
    assert_eq!(engine.lock().current_slot(), stopped_at);
}
