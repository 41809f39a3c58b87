//! Audit trail of engine lifecycle events.

use std::collections::VecDeque;

use crate::core::events::EngineEvent;
use crate::util::clock::now_ms;
use crate::util::serde::{SlotIndex, TxId};

/// One audit record.
#[derive(Debug, Clone)]
pub struct AuditEvent {
    /// Event identifier.
    pub event_id: String,
    /// Run the event belongs to.
    pub run_id: String,
    /// Related transaction, if any.
    pub tx_id: Option<TxId>,
    /// Related slot, if any.
    pub slot: Option<SlotIndex>,
    /// Action taken (create, place, abandon, advance, external_load, config, reset).
    pub action: String,
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
    /// Additional context.
    pub detail: Option<String>,
}

/// Audit sink abstraction.
pub trait AuditSink: Send {
    /// Record an audit event.
    fn record(&mut self, event: AuditEvent);
}

/// Bounded in-memory audit sink; the oldest record is dropped when full.
pub struct InMemoryAuditSink {
    events: VecDeque<AuditEvent>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink holding at most `max_events` records.
    pub fn new(max_events: usize) -> Self {
        let max_events = max_events.max(1);
        Self {
            events: VecDeque::with_capacity(max_events.min(1024)),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.iter().cloned().collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&mut self, event: AuditEvent) {
        if self.events.len() >= self.max_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

/// Sink sharing its buffer with the caller so records stay readable after
/// the sink has been handed to an engine.
#[derive(Clone, Default)]
pub struct SharedAuditSink {
    inner: std::sync::Arc<parking_lot::Mutex<Vec<AuditEvent>>>,
}

impl SharedAuditSink {
    /// Empty shared sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every record so far.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.inner.lock().clone()
    }
}

impl AuditSink for SharedAuditSink {
    fn record(&mut self, event: AuditEvent) {
        self.inner.lock().push(event);
    }
}

/// Helper to build an audit event from context.
pub fn build_audit_event(
    event_id: impl Into<String>,
    run_id: impl Into<String>,
    tx_id: Option<TxId>,
    slot: Option<SlotIndex>,
    action: impl Into<String>,
    detail: Option<String>,
) -> AuditEvent {
    AuditEvent {
        event_id: event_id.into(),
        run_id: run_id.into(),
        tx_id,
        slot,
        action: action.into(),
        created_at_ms: now_ms(),
        detail,
    }
}

/// Audit record for an engine event; `seq` disambiguates events within a run.
pub fn audit_engine_event(run_id: &str, seq: u64, event: &EngineEvent) -> AuditEvent {
    build_audit_event(
        format!("{run_id}-{seq}"),
        run_id,
        event.tx_id(),
        event.slot(),
        event.action(),
        serde_json::to_string(event).ok(),
    )
}
