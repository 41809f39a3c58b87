//! Request/response models and helpers over a shared engine.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::{EngineSnapshot, SlotEngine, TransactionRequest, TransactionStatus};
use crate::util::serde::{SlotIndex, TxId};

/// Engine shared between a driver and its clients.
pub type SharedEngine = Arc<Mutex<SlotEngine>>;

/// Number of copies submitted by a burst when none is given.
pub const DEFAULT_BURST: usize = 10;

/// Wrap an engine for sharing.
pub fn shared(engine: SlotEngine) -> SharedEngine {
    Arc::new(Mutex::new(engine))
}

/// Outcome of a creation request as seen right after admission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResponse {
    /// Assigned id.
    pub id: TxId,
    /// Status after admission.
    pub status: TransactionStatus,
    /// Slot, when placed.
    pub scheduled_slot: Option<SlotIndex>,
    /// Retries accumulated during admission.
    pub retry_count: u64,
}

/// Configuration change requested by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "setting", rename_all = "snake_case")]
pub enum ConfigUpdate {
    /// Per-slot capacity.
    Capacity {
        /// New budget (clamped to at least 1).
        capacity: u64,
    },
    /// External congestion.
    ExternalLoad {
        /// Inject on every advance.
        enabled: bool,
        /// Share of capacity (clamped to 100).
        percent: u32,
    },
    /// Group-preserving backlog ordering.
    GroupPreserving {
        /// New mode.
        enabled: bool,
    },
}

fn respond(engine: &SlotEngine, id: TxId) -> Option<TransactionResponse> {
    engine.transaction(id).map(|tx| TransactionResponse {
        id,
        status: tx.status(),
        scheduled_slot: tx.scheduled_slot,
        retry_count: tx.retry_count,
    })
}

/// Create one transaction.
pub fn submit_transaction(
    engine: &SharedEngine,
    request: &TransactionRequest,
) -> Option<TransactionResponse> {
    let mut guard = engine.lock();
    let id = guard.create_transaction(request);
    respond(&guard, id)
}

/// Create `count` copies of the same request, in order.
pub fn submit_burst(engine: &SharedEngine, request: &TransactionRequest, count: usize) -> Vec<TxId> {
    let mut guard = engine.lock();
    (0..count).map(|_| guard.create_transaction(request)).collect()
}

/// Advance one slot.
pub fn advance(engine: &SharedEngine) {
    engine.lock().advance_one_slot();
}

/// Clear the run.
pub fn reset(engine: &SharedEngine) {
    engine.lock().reset();
}

/// Apply a configuration change.
pub fn apply_config(engine: &SharedEngine, update: ConfigUpdate) {
    let mut guard = engine.lock();
    match update {
        ConfigUpdate::Capacity { capacity } => guard.set_capacity(capacity),
        ConfigUpdate::ExternalLoad { enabled, percent } => guard.set_external_load(enabled, percent),
        ConfigUpdate::GroupPreserving { enabled } => guard.set_group_preserving(enabled),
    }
}

/// Read-only view of the run.
pub fn snapshot(engine: &SharedEngine) -> EngineSnapshot {
    engine.lock().snapshot()
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
    /// Current slot of the engine.
    pub current_slot: SlotIndex,
}

/// Return a health payload.
pub fn health(engine: &SharedEngine) -> Health {
    Health {
        ok: true,
        current_slot: engine.lock().current_slot(),
    }
}
