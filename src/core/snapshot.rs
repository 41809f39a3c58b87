//! Read model handed to renderers and exporters.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::registry::Transaction;
use crate::util::serde::{SlotIndex, TxId};

/// One slot as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    /// Absolute index.
    pub index: SlotIndex,
    /// CU used by scheduled transactions.
    pub used: u64,
    /// CU used by external load.
    pub external_used: u64,
    /// Per-slot budget at snapshot time.
    pub capacity: u64,
    /// Remaining budget; negative when oversubscribed.
    pub available: i64,
    /// Transactions placed in the slot.
    pub transaction_ids: Vec<TxId>,
}

/// Aggregate run metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineMetrics {
    /// Absolute index of the current slot.
    pub current_slot: SlotIndex,
    /// Unplaced JIT transactions.
    pub backlog_size: usize,
    /// Backlog entries whose deadline precedes the current slot.
    pub expired_backlog: usize,
    /// `total used / (capacity * slot count)` across the window.
    pub fill_rate: f64,
    /// Failed placement steps this run.
    pub total_retries: u64,
    /// Transactions created this run.
    pub transaction_count: usize,
    /// Transactions holding a slot.
    pub scheduled_count: usize,
    /// AOT reservations that exhausted their walk.
    pub abandoned_count: usize,
}

/// Full read-only view of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Run identifier, regenerated on reset.
    pub run_id: Uuid,
    /// Wall-clock time of the snapshot in milliseconds.
    pub taken_at_ms: u64,
    /// Per-slot budget.
    pub capacity: u64,
    /// Window from current slot to farthest slot.
    pub slots: Vec<SlotView>,
    /// Every transaction in creation order.
    pub transactions: Vec<Transaction>,
    /// Aggregates.
    pub metrics: EngineMetrics,
}
