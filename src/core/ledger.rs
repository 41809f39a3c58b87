//! Per-slot capacity accounting for scheduled and external load.

use serde::{Deserialize, Serialize};

use crate::core::registry::Transaction;
use crate::core::slot_window::{Slot, SlotWindow};

/// Upper bound for the external load percentage.
pub const MAX_EXTERNAL_PERCENT: u32 = 100;

/// External congestion setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLoad {
    /// Whether load is re-injected on every advance.
    pub enabled: bool,
    /// Share of capacity consumed, 0..=100.
    pub percent: u32,
}

impl ExternalLoad {
    /// Build a setting with `percent` clamped to 0..=100.
    pub fn new(enabled: bool, percent: u32) -> Self {
        Self {
            enabled,
            percent: percent.min(MAX_EXTERNAL_PERCENT),
        }
    }
}

impl Default for ExternalLoad {
    fn default() -> Self {
        Self {
            enabled: false,
            percent: 50,
        }
    }
}

/// Capacity budget shared by scheduled transactions (`used`) and
/// injected congestion (`external_used`).
#[derive(Debug, Clone)]
pub struct CapacityLedger {
    capacity: u64,
    external_load: ExternalLoad,
}

impl CapacityLedger {
    /// Ledger with a per-slot `capacity` (raised to at least 1).
    pub fn new(capacity: u64, external_load: ExternalLoad) -> Self {
        Self {
            capacity: capacity.max(1),
            external_load: ExternalLoad::new(external_load.enabled, external_load.percent),
        }
    }

    /// Per-slot CU budget.
    pub const fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Replace the per-slot budget. Existing reservations are untouched.
    pub fn set_capacity(&mut self, capacity: u64) {
        self.capacity = capacity.max(1);
    }

    /// Current external load setting.
    pub const fn external_load(&self) -> ExternalLoad {
        self.external_load
    }

    /// Replace the external load setting, clamping the percentage.
    pub fn set_external_load(&mut self, enabled: bool, percent: u32) {
        self.external_load = ExternalLoad::new(enabled, percent);
    }

    /// `capacity - (used + external_used)`; negative when external load
    /// or a capacity cut has oversubscribed the slot.
    pub fn available_in(&self, slot: &Slot) -> i64 {
        let available = i128::from(self.capacity) - i128::from(slot.total_used());
        i64::try_from(available).unwrap_or(if available < 0 { i64::MIN } else { i64::MAX })
    }

    /// Whether `cu` fits in `slot` right now. Exact fits succeed.
    pub fn fits(&self, slot: &Slot, cu: u64) -> bool {
        slot.total_used()
            .checked_add(cu)
            .is_some_and(|total| total <= self.capacity)
    }

    /// Reserve `tx.cu` in `slot` if it fits. All or nothing.
    pub fn try_reserve(&self, slot: &mut Slot, tx: &Transaction) -> bool {
        if !self.fits(slot, tx.cu) {
            return false;
        }
        slot.used += tx.cu;
        slot.transaction_ids.push(tx.id);
        true
    }

    /// CU written to every slot when external load is injected.
    ///
    /// Computed in `u128` so it never exceeds `capacity`.
    pub fn external_target(&self) -> u64 {
        let target = u128::from(self.capacity) * u128::from(self.external_load.percent)
            / u128::from(MAX_EXTERNAL_PERCENT);
        u64::try_from(target).unwrap_or(self.capacity)
    }

    /// Overwrite `external_used` on every slot in the window.
    ///
    /// No-op while disabled. Returns the injected amount per slot.
    /// Already reserved `used` is never reduced.
    pub fn inject_external_load(&self, window: &mut SlotWindow) -> Option<u64> {
        if !self.external_load.enabled {
            return None;
        }
        let target = self.external_target();
        let mut oversubscribed = 0usize;
        for slot in window.iter_mut() {
            slot.external_used = target;
            if slot.total_used() > self.capacity {
                oversubscribed += 1;
            }
        }
        if oversubscribed > 0 {
            tracing::warn!(
                "external load {} CU oversubscribes {} slot(s) at capacity {}",
                target,
                oversubscribed,
                self.capacity
            );
        }
        Some(target)
    }
}
