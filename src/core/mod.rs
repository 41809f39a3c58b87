//! Slot scheduling engine and capacity accounting.

pub mod admission;
pub mod audit;
pub mod engine;
pub mod error;
pub mod events;
pub mod ledger;
pub mod registry;
pub mod retry;
pub mod slot_window;
pub mod snapshot;

pub use admission::{AdmissionEngine, JitPass, Placement};
pub use audit::{
    audit_engine_event, build_audit_event, AuditEvent, AuditSink, InMemoryAuditSink,
    SharedAuditSink,
};
pub use engine::SlotEngine;
pub use error::{AppResult, SchedulerError};
pub use events::{EngineEvent, EventBus, EVENT_BUFFER};
pub use ledger::{CapacityLedger, ExternalLoad};
pub use registry::{Transaction, TransactionRegistry, TransactionRequest, TransactionStatus};
pub use retry::RetryCounter;
pub use slot_window::{Slot, SlotWindow};
pub use snapshot::{EngineMetrics, EngineSnapshot, SlotView};
