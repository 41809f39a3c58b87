//! Tests for snapshot export

use slot_orchestrator::config::SimulationConfig;
use slot_orchestrator::core::{EngineSnapshot, SlotEngine, TransactionRequest};
use slot_orchestrator::infra::{export_file_name, to_csv_string, to_json_string, write_csv};
use slot_orchestrator::util::Priority;

fn small_engine() -> SlotEngine {
    SlotEngine::new(&SimulationConfig::default().with_slot_count(3).with_slot_capacity(1000))
}

#[test]
fn test_csv_layout() {
    let mut engine = small_engine();
    engine.create_transaction(&TransactionRequest::jit(800, 2).with_priority(Priority::High));
    engine.create_transaction(&TransactionRequest::aot(900, 1, 5).with_group("ORACLE"));

    let csv = to_csv_string(&engine.snapshot()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(
        lines,
        vec![
            "type,slot,used,extUsed,capacity",
            "slot,0,800,0,1000",
            "slot,1,0,0,1000",
            "slot,2,0,0,1000",
            "type,id,cu,priority,group,createdAt,deadline,scheduledSlot,retries,mode",
            "tx,1,800,high,DEX,0,2,0,0,jit",
            "tx,2,900,medium,ORACLE,0,1,,0,aot",
        ]
    );
}

#[test]
fn test_export_does_not_mutate() {
    let mut engine = small_engine();
    engine.create_transaction(&TransactionRequest::jit(1500, 2));
    let before = engine.metrics();

    let mut sink = Vec::new();
    write_csv(&engine.snapshot(), &mut sink).unwrap();
    to_json_string(&engine.snapshot()).unwrap();

    assert_eq!(engine.metrics(), before);
    assert_eq!(engine.backlog().len(), 1);
}

#[test]
fn test_json_round_trip_snapshot() {
    let mut engine = small_engine();
    engine.create_transaction(&TransactionRequest::jit(400, 2));
    let snapshot = engine.snapshot();

    let json = to_json_string(&snapshot).unwrap();
    let parsed: EngineSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.run_id, snapshot.run_id);
    assert_eq!(parsed.slots, snapshot.slots);
    assert_eq!(parsed.transactions, snapshot.transactions);
}

#[test]
fn test_export_file_name() {
    let name = export_file_name("csv");
    assert!(name.starts_with("slot-sim-"));
    assert!(name.ends_with(".csv"));
}
