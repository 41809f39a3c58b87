//! Run-wide count of failed placement steps.

/// Monotonic counter of slot steps that did not fit.
///
/// Both admission policies feed it. Only a full reset clears it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryCounter {
    total: u64,
}

impl RetryCounter {
    /// Counter starting at zero.
    pub const fn new() -> Self {
        Self { total: 0 }
    }

    /// Record one failed step.
    pub const fn record(&mut self) {
        self.record_many(1);
    }

    /// Record `count` failed steps at once.
    pub const fn record_many(&mut self, count: u64) {
        self.total = self.total.saturating_add(count);
    }

    /// Failed steps recorded since the last reset.
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Back to zero.
    pub const fn reset(&mut self) {
        self.total = 0;
    }
}
