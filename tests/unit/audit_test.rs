//! Tests for audit sinks

use slot_orchestrator::core::{
    audit_engine_event, build_audit_event, AuditSink, EngineEvent, InMemoryAuditSink,
};

#[test]
fn test_in_memory_audit_sink() {
    let mut sink = InMemoryAuditSink::new(10);

    let event = build_audit_event("evt1", "run1", Some(7), Some(3), "place", Some("detail".into()));

    sink.record(event);
    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_id, "evt1");
    assert_eq!(events[0].tx_id, Some(7));
    assert_eq!(events[0].slot, Some(3));
    assert_eq!(events[0].action, "place");
}

#[test]
fn test_audit_sink_overflow() {
    let mut sink = InMemoryAuditSink::new(2);

    sink.record(build_audit_event("evt1", "run1", None, None, "create", None));
    sink.record(build_audit_event("evt2", "run1", None, None, "create", None));
    sink.record(build_audit_event("evt3", "run1", None, None, "create", None));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event_id, "evt2"); // First one popped
    assert_eq!(events[1].event_id, "evt3");
}

#[test]
fn test_audit_from_engine_event() {
    let event = EngineEvent::Abandoned { id: 12, retries: 2 };
    let audit = audit_engine_event("run-x", 5, &event);

    assert_eq!(audit.event_id, "run-x-5");
    assert_eq!(audit.run_id, "run-x");
    assert_eq!(audit.action, "abandon");
    assert_eq!(audit.tx_id, Some(12));
    assert!(audit.detail.unwrap().contains("\"kind\":\"abandoned\""));
    assert!(audit.created_at_ms > 0);
}
