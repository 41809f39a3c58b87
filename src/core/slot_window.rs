//! Rolling horizon of slots anchored at the current slot.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::util::serde::{SlotIndex, TxId};

/// One discrete slot of the scheduling horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Absolute index, monotonic across the run.
    pub index: SlotIndex,
    /// CU consumed by scheduled transactions.
    pub used: u64,
    /// CU consumed by injected external load.
    pub external_used: u64,
    /// Transactions placed here, in placement order.
    pub transaction_ids: Vec<TxId>,
}

impl Slot {
    /// An empty slot at `index`.
    pub const fn empty(index: SlotIndex) -> Self {
        Self {
            index,
            used: 0,
            external_used: 0,
            transaction_ids: Vec::new(),
        }
    }

    /// Internal plus external consumption, saturating at `u64::MAX`.
    pub const fn total_used(&self) -> u64 {
        self.used.saturating_add(self.external_used)
    }
}

/// Fixed-size window of contiguous slots.
///
/// Relative position 0 is the current slot; position `len - 1` is the
/// farthest future slot. Absolute indices are always
/// `current_slot..current_slot + len`.
#[derive(Debug, Clone)]
pub struct SlotWindow {
    slots: VecDeque<Slot>,
    slot_count: usize,
    current_slot: SlotIndex,
}

impl SlotWindow {
    /// Build a window of `slot_count` empty slots at indices `0..slot_count`.
    ///
    /// A zero `slot_count` is raised to 1.
    pub fn new(slot_count: usize) -> Self {
        let slot_count = slot_count.max(1);
        let mut window = Self {
            slots: VecDeque::with_capacity(slot_count),
            slot_count,
            current_slot: 0,
        };
        window.initialize();
        window
    }

    /// Repopulate with empty slots at indices `0..slot_count`.
    pub fn initialize(&mut self) {
        self.current_slot = 0;
        self.slots.clear();
        self.slots.extend((0..self.slot_count as SlotIndex).map(Slot::empty));
    }

    /// Absolute index of relative position 0.
    pub const fn current_slot(&self) -> SlotIndex {
        self.current_slot
    }

    /// Number of slots in the horizon.
    pub const fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Absolute index of the farthest slot in the horizon.
    pub const fn last_slot(&self) -> SlotIndex {
        self.current_slot + self.slot_count as SlotIndex - 1
    }

    /// Whether `index` is inside the horizon.
    pub const fn contains(&self, index: SlotIndex) -> bool {
        index >= self.current_slot && index <= self.last_slot()
    }

    fn relative(&self, index: SlotIndex) -> Option<usize> {
        if !self.contains(index) {
            return None;
        }
        usize::try_from(index - self.current_slot).ok()
    }

    /// Slot at an absolute index, `None` when outside the horizon.
    pub fn slot_at(&self, index: SlotIndex) -> Option<&Slot> {
        self.relative(index).and_then(|rel| self.slots.get(rel))
    }

    /// Mutable slot at an absolute index, `None` when outside the horizon.
    pub fn slot_at_mut(&mut self, index: SlotIndex) -> Option<&mut Slot> {
        self.relative(index).and_then(|rel| self.slots.get_mut(rel))
    }

    /// Evict the oldest slot and append an empty one at the far end.
    ///
    /// Returns the evicted slot. Transactions placed in it keep their
    /// `scheduled_slot`.
    pub fn advance(&mut self) -> Option<Slot> {
        let evicted = self.slots.pop_front();
        let appended = self.current_slot + self.slot_count as SlotIndex;
        self.slots.push_back(Slot::empty(appended));
        self.current_slot += 1;
        evicted
    }

    /// Slots from current to farthest.
    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    /// Mutable slots from current to farthest.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Slot> {
        self.slots.iter_mut()
    }

    /// Sum of `used` across the horizon.
    pub fn total_used(&self) -> u64 {
        self.slots.iter().fold(0, |acc, s| acc.saturating_add(s.used))
    }
}
