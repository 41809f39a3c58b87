//! Tests for utility types

use slot_orchestrator::util::{init_tracing, now_ms, AdmissionMode, Priority, TxId};

#[test]
fn test_priority_weights() {
    assert_eq!(Priority::Low.weight(), 1);
    assert_eq!(Priority::Medium.weight(), 2);
    assert_eq!(Priority::High.weight(), 3);
    assert!(Priority::High > Priority::Medium);
    assert!(Priority::Medium > Priority::Low);
}

#[test]
fn test_labels_and_serde() {
    assert_eq!(Priority::High.to_string(), "high");
    assert_eq!(AdmissionMode::Aot.to_string(), "aot");
    assert_eq!(serde_json::to_string(&AdmissionMode::Jit).unwrap(), "\"jit\"");
    let p: Priority = serde_json::from_str("\"low\"").unwrap();
    assert_eq!(p, Priority::Low);
}

#[test]
fn test_clock_and_tracing() {
    assert!(now_ms() > 0);
    init_tracing();
    init_tracing();
    let id: TxId = 1;
    assert_eq!(id, 1);
}
