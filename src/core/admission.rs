//! Ahead-of-time and just-in-time admission policies.
//!
//! Both policies reduce to the same forward walk: try to reserve in one
//! slot, count a retry on failure, step to the next slot, and stop at the
//! first success or once the walk passes the transaction's deadline slot
//! (inclusive). They differ in where the walk starts and in what happens
//! to a transaction that exhausts it:
//!
//! - **AOT** starts at `current_slot + reserve_offset` and is abandoned on
//!   failure. It never enters the backlog.
//! - **JIT** starts at the current slot every time it is evaluated and stays
//!   in the backlog until placed, even after its deadline has scrolled out.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::core::ledger::CapacityLedger;
use crate::core::registry::{Transaction, TransactionRegistry};
use crate::core::retry::RetryCounter;
use crate::core::slot_window::SlotWindow;
use crate::util::serde::{SlotIndex, TxId};

/// The mutable state a placement walk touches.
pub struct Placement<'a> {
    /// Horizon being placed into.
    pub window: &'a mut SlotWindow,
    /// Capacity rules.
    pub ledger: &'a CapacityLedger,
    /// Run-wide retry count.
    pub retries: &'a mut RetryCounter,
}

impl Placement<'_> {
    /// Walk from `from` through `tx.deadline_slot` inclusive.
    ///
    /// Every failed step, including steps outside the horizon, counts as
    /// one retry on both the transaction and the run. An already placed
    /// transaction is returned as-is without touching any slot.
    pub fn walk(&mut self, tx: &mut Transaction, from: SlotIndex) -> Option<SlotIndex> {
        if let Some(slot) = tx.scheduled_slot {
            return Some(slot);
        }
        let ledger = self.ledger;
        let last = self.window.last_slot();
        let mut index = from;
        while index <= tx.deadline_slot {
            if index > last {
                // Nothing past the horizon can be reserved.
                let remaining = tx.deadline_slot - index + 1;
                self.fail(tx, remaining);
                return None;
            }
            let reserved = self
                .window
                .slot_at_mut(index)
                .is_some_and(|slot| ledger.try_reserve(slot, tx));
            if reserved {
                tx.scheduled_slot = Some(index);
                tracing::debug!(
                    "tx {} placed at slot {} after {} retries",
                    tx.id,
                    index,
                    tx.retry_count
                );
                return Some(index);
            }
            self.fail(tx, 1);
            index += 1;
        }
        None
    }

    fn fail(&mut self, tx: &mut Transaction, steps: u64) {
        tx.retry_count = tx.retry_count.saturating_add(steps);
        self.retries.record_many(steps);
    }
}

/// Result of one JIT pass over the backlog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JitPass {
    /// Transactions placed during the pass, in evaluation order.
    pub placed: Vec<(TxId, SlotIndex)>,
    /// Backlog size after the pass.
    pub remaining: usize,
}

/// Owns the JIT backlog and applies both admission policies.
#[derive(Debug, Clone, Default)]
pub struct AdmissionEngine {
    backlog: Vec<TxId>,
    group_preserving: bool,
}

impl AdmissionEngine {
    /// Empty backlog with the given ordering mode.
    pub const fn new(group_preserving: bool) -> Self {
        Self {
            backlog: Vec::new(),
            group_preserving,
        }
    }

    /// Whether group-preserving ordering is active.
    pub const fn group_preserving(&self) -> bool {
        self.group_preserving
    }

    /// Switch backlog ordering for subsequent passes.
    pub const fn set_group_preserving(&mut self, enabled: bool) {
        self.group_preserving = enabled;
    }

    /// Unplaced JIT transaction ids in their current order.
    pub fn backlog(&self) -> &[TxId] {
        &self.backlog
    }

    /// Drop the backlog. Only used by a full reset.
    pub fn clear(&mut self) {
        self.backlog.clear();
    }

    /// Reserve `tx` walking forward from `current_slot + max(0, reserve_offset)`.
    ///
    /// `None` means the reservation is abandoned for good.
    pub fn admit_aot(
        placement: &mut Placement<'_>,
        tx: &mut Transaction,
        reserve_offset: i64,
    ) -> Option<SlotIndex> {
        let offset = u64::try_from(reserve_offset).unwrap_or(0);
        let target = placement.window.current_slot().saturating_add(offset);
        let placed = placement.walk(tx, target);
        if placed.is_none() {
            tracing::warn!(
                "aot tx {} abandoned: no slot in {}..={} ({} retries)",
                tx.id,
                target,
                tx.deadline_slot,
                tx.retry_count
            );
        }
        placed
    }

    /// Add a new JIT transaction to the end of the backlog.
    pub fn enqueue(&mut self, id: TxId) {
        self.backlog.push(id);
    }

    /// Reorder the backlog for the next pass.
    ///
    /// Default mode is a stable sort by descending priority weight. In
    /// group-preserving mode each group is stably sorted by priority within
    /// the backlog positions it already occupies, so members of different
    /// groups never change places relative to each other.
    pub fn order_backlog(&mut self, registry: &TransactionRegistry) {
        let weight = |id: TxId| registry.get(id).map_or(0, Transaction::weight);
        if !self.group_preserving {
            self.backlog.sort_by_key(|&id| Reverse(weight(id)));
            return;
        }

        let mut group_of: HashMap<&str, usize> = HashMap::new();
        let mut positions: Vec<Vec<usize>> = Vec::new();
        for (pos, &id) in self.backlog.iter().enumerate() {
            let group = registry.get(id).map_or("", |t| t.group.as_str());
            let slot = *group_of.entry(group).or_insert_with(|| {
                positions.push(Vec::new());
                positions.len() - 1
            });
            positions[slot].push(pos);
        }
        for group_positions in positions {
            let mut members: Vec<TxId> = group_positions.iter().map(|&p| self.backlog[p]).collect();
            members.sort_by_key(|&id| Reverse(weight(id)));
            for (pos, id) in group_positions.into_iter().zip(members) {
                self.backlog[pos] = id;
            }
        }
    }

    /// Order the backlog, then walk every entry from the current slot.
    ///
    /// Entries that fail stay in the backlog in their evaluated order.
    pub fn run_jit(
        &mut self,
        placement: &mut Placement<'_>,
        registry: &mut TransactionRegistry,
    ) -> JitPass {
        self.order_backlog(registry);
        let from = placement.window.current_slot();
        let mut pass = JitPass::default();
        let mut kept = Vec::with_capacity(self.backlog.len());
        for id in std::mem::take(&mut self.backlog) {
            let Some(tx) = registry.get_mut(id) else {
                continue;
            };
            match placement.walk(tx, from) {
                Some(slot) => pass.placed.push((id, slot)),
                None => kept.push(id),
            }
        }
        self.backlog = kept;
        pass.remaining = self.backlog.len();
        pass
    }
}
