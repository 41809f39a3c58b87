//! Shared value types used across the engine, config and export layers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Transaction identifier, assigned monotonically starting at 1.
pub type TxId = u64;

/// Absolute slot index, monotonic across a run.
pub type SlotIndex = u64;

/// Transaction priority used for JIT backlog ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Weight 1.
    Low,
    /// Weight 2.
    #[default]
    Medium,
    /// Weight 3.
    High,
}

impl Priority {
    /// Ordering weight: low=1, medium=2, high=3.
    pub const fn weight(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Lowercase label used in exports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admission policy selected for a transaction at creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionMode {
    /// Ahead-of-time reservation walking forward from a target slot.
    Aot,
    /// Just-in-time greedy placement from the backlog.
    #[default]
    Jit,
}

impl AdmissionMode {
    /// Lowercase label used in exports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aot => "aot",
            Self::Jit => "jit",
        }
    }
}

impl fmt::Display for AdmissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
