//! Append-only log of every transaction created during a run.

use serde::{Deserialize, Serialize};

use crate::util::serde::{AdmissionMode, Priority, SlotIndex, TxId};

/// A creation request as received from a client.
///
/// Values are clamped by [`TransactionRequest::normalized`] before they
/// reach the engine: `cu >= 1`, `deadline_offset >= 1`,
/// `reserve_offset >= 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionRequest {
    /// CU cost.
    pub cu: u64,
    /// Deadline measured in slots from the creation slot.
    pub deadline_offset: u64,
    /// Backlog ordering priority.
    pub priority: Priority,
    /// Group label used by group-preserving ordering.
    pub group: String,
    /// Admission policy.
    pub mode: AdmissionMode,
    /// AOT target offset from the current slot; ignored for JIT.
    pub reserve_offset: i64,
}

impl Default for TransactionRequest {
    fn default() -> Self {
        Self {
            cu: 2000,
            deadline_offset: 10,
            priority: Priority::Medium,
            group: "DEX".into(),
            mode: AdmissionMode::Jit,
            reserve_offset: 0,
        }
    }
}

impl TransactionRequest {
    /// JIT request with the given cost and deadline offset.
    pub fn jit(cu: u64, deadline_offset: u64) -> Self {
        Self {
            cu,
            deadline_offset,
            mode: AdmissionMode::Jit,
            ..Self::default()
        }
    }

    /// AOT request targeting `reserve_offset` slots ahead.
    pub fn aot(cu: u64, deadline_offset: u64, reserve_offset: i64) -> Self {
        Self {
            cu,
            deadline_offset,
            mode: AdmissionMode::Aot,
            reserve_offset,
            ..Self::default()
        }
    }

    /// Set the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the group label.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Copy with out-of-range values clamped to the nearest valid one.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            cu: self.cu.max(1),
            deadline_offset: self.deadline_offset.max(1),
            reserve_offset: self.reserve_offset.max(0),
            ..self.clone()
        }
    }
}

/// A transaction and its placement state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique, monotonically assigned id.
    pub id: TxId,
    /// CU cost.
    pub cu: u64,
    /// Backlog ordering priority.
    pub priority: Priority,
    /// Group label.
    pub group: String,
    /// Current slot at creation.
    pub created_at_slot: SlotIndex,
    /// Last slot (inclusive) the transaction may be placed in.
    pub deadline_slot: SlotIndex,
    /// Final placement; never changes once set.
    pub scheduled_slot: Option<SlotIndex>,
    /// Failed placement steps for this transaction.
    pub retry_count: u64,
    /// Admission policy.
    pub mode: AdmissionMode,
}

/// Display status derived from placement state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Placed in a slot.
    Scheduled,
    /// AOT walk exhausted; will never be placed.
    Abandoned,
    /// JIT backlog entry that has failed at least one step.
    Retrying,
    /// JIT backlog entry with no failed steps yet.
    Pending,
}

impl Transaction {
    /// Whether a slot has been assigned.
    pub const fn is_scheduled(&self) -> bool {
        self.scheduled_slot.is_some()
    }

    /// Priority weight used for ordering.
    pub const fn weight(&self) -> u8 {
        self.priority.weight()
    }

    /// Derived display status.
    pub const fn status(&self) -> TransactionStatus {
        match (self.scheduled_slot, self.mode) {
            (Some(_), _) => TransactionStatus::Scheduled,
            (None, AdmissionMode::Aot) => TransactionStatus::Abandoned,
            (None, AdmissionMode::Jit) if self.retry_count > 0 => TransactionStatus::Retrying,
            (None, AdmissionMode::Jit) => TransactionStatus::Pending,
        }
    }
}

/// Append-only transaction store keyed by id.
///
/// Ids start at 1 and increase by one per registration, so the backing
/// vector is sorted by id.
#[derive(Debug, Clone)]
pub struct TransactionRegistry {
    transactions: Vec<Transaction>,
    next_id: TxId,
}

impl Default for TransactionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionRegistry {
    /// Empty registry; the first id handed out is 1.
    pub const fn new() -> Self {
        Self {
            transactions: Vec::new(),
            next_id: 1,
        }
    }

    /// Record a new transaction created at `current_slot`.
    ///
    /// The request must already be normalized.
    pub fn register(&mut self, request: &TransactionRequest, current_slot: SlotIndex) -> TxId {
        let id = self.next_id;
        self.next_id += 1;
        self.transactions.push(Transaction {
            id,
            cu: request.cu,
            priority: request.priority,
            group: request.group.clone(),
            created_at_slot: current_slot,
            deadline_slot: current_slot.saturating_add(request.deadline_offset.max(1)),
            scheduled_slot: None,
            retry_count: 0,
            mode: request.mode,
        });
        id
    }

    fn position(&self, id: TxId) -> Option<usize> {
        self.transactions.binary_search_by_key(&id, |t| t.id).ok()
    }

    /// Look up a transaction.
    pub fn get(&self, id: TxId) -> Option<&Transaction> {
        self.position(id).map(|pos| &self.transactions[pos])
    }

    /// Look up a transaction for in-place mutation.
    pub fn get_mut(&mut self, id: TxId) -> Option<&mut Transaction> {
        self.position(id).map(|pos| &mut self.transactions[pos])
    }

    /// Transactions in creation order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Transaction> {
        self.transactions.iter()
    }

    /// Transactions newest first.
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().rev()
    }

    /// Number of transactions ever created this run.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether nothing has been created this run.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Drop everything and restart ids at 1. Only used by a full reset.
    pub fn clear(&mut self) {
        self.transactions.clear();
        self.next_id = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut registry = TransactionRegistry::new();
        let a = registry.register(&TransactionRequest::jit(100, 3), 0);
        let b = registry.register(&TransactionRequest::jit(100, 3), 4);
        assert_eq!((a, b), (1, 2));
        assert_eq!(registry.get(b).unwrap().created_at_slot, 4);
        assert_eq!(registry.get(b).unwrap().deadline_slot, 7);
        assert!(registry.get(3).is_none());
    }

    #[test]
    fn test_iteration_orders() {
        let mut registry = TransactionRegistry::new();
        for _ in 0..3 {
            registry.register(&TransactionRequest::default(), 0);
        }
        let forward: Vec<_> = registry.iter().map(|t| t.id).collect();
        let newest: Vec<_> = registry.iter_newest_first().map(|t| t.id).collect();
        assert_eq!(forward, vec![1, 2, 3]);
        assert_eq!(newest, vec![3, 2, 1]);
    }

    #[test]
    fn test_clear_restarts_ids() {
        let mut registry = TransactionRegistry::new();
        registry.register(&TransactionRequest::default(), 0);
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.register(&TransactionRequest::default(), 0), 1);
    }

    #[test]
    fn test_normalized_clamps() {
        let request = TransactionRequest {
            cu: 0,
            deadline_offset: 0,
            reserve_offset: -4,
            ..TransactionRequest::default()
        }
        .normalized();
        assert_eq!(request.cu, 1);
        assert_eq!(request.deadline_offset, 1);
        assert_eq!(request.reserve_offset, 0);
    }

    #[test]
    fn test_status_derivation() {
        let mut registry = TransactionRegistry::new();
        let jit = registry.register(&TransactionRequest::jit(10, 2), 0);
        let aot = registry.register(&TransactionRequest::aot(10, 2, 1), 0);
        assert_eq!(registry.get(jit).unwrap().status(), TransactionStatus::Pending);
        assert_eq!(registry.get(aot).unwrap().status(), TransactionStatus::Abandoned);

        registry.get_mut(jit).unwrap().retry_count = 2;
        assert_eq!(registry.get(jit).unwrap().status(), TransactionStatus::Retrying);
        registry.get_mut(jit).unwrap().scheduled_slot = Some(1);
        assert_eq!(registry.get(jit).unwrap().status(), TransactionStatus::Scheduled);
    }
}
