//! State-change notifications for presentation collaborators.

use crossbeam_channel::{Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};

use crate::util::serde::{AdmissionMode, SlotIndex, TxId};

/// Something observable happened inside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineEvent {
    /// A transaction was registered.
    Created {
        /// New transaction id.
        id: TxId,
        /// Admission policy requested.
        mode: AdmissionMode,
    },
    /// A transaction received its final slot.
    Placed {
        /// Transaction id.
        id: TxId,
        /// Absolute slot index.
        slot: SlotIndex,
        /// Retries accumulated before placement.
        retries: u64,
    },
    /// An AOT reservation exhausted its walk.
    Abandoned {
        /// Transaction id.
        id: TxId,
        /// Retries accumulated during the walk.
        retries: u64,
    },
    /// The window moved forward by one slot.
    Advanced {
        /// New current slot.
        current_slot: SlotIndex,
        /// Backlog size after the JIT re-pass.
        backlog: usize,
    },
    /// External load was written across the window.
    ExternalLoadInjected {
        /// CU written into every slot.
        per_slot: u64,
    },
    /// A configuration mutator ran.
    ConfigChanged {
        /// Which setting changed.
        setting: String,
    },
    /// The run was cleared.
    Reset,
}

impl EngineEvent {
    /// Short action label used by audit records.
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Created { .. } => "create",
            Self::Placed { .. } => "place",
            Self::Abandoned { .. } => "abandon",
            Self::Advanced { .. } => "advance",
            Self::ExternalLoadInjected { .. } => "external_load",
            Self::ConfigChanged { .. } => "config",
            Self::Reset => "reset",
        }
    }

    /// Transaction the event concerns, if any.
    pub const fn tx_id(&self) -> Option<TxId> {
        match self {
            Self::Created { id, .. } | Self::Placed { id, .. } | Self::Abandoned { id, .. } => {
                Some(*id)
            }
            _ => None,
        }
    }

    /// Slot the event concerns, if any.
    pub const fn slot(&self) -> Option<SlotIndex> {
        match self {
            Self::Placed { slot, .. } => Some(*slot),
            Self::Advanced { current_slot, .. } => Some(*current_slot),
            _ => None,
        }
    }
}

/// Events buffered per subscriber before it is considered stalled.
pub const EVENT_BUFFER: usize = 1024;

/// Fan-out of engine events to any number of subscribers.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<EngineEvent>>,
}

impl EventBus {
    /// Bus with no subscribers.
    pub const fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Register a subscriber buffering up to [`EVENT_BUFFER`] events.
    pub fn subscribe(&mut self) -> Receiver<EngineEvent> {
        let (tx, rx) = crossbeam_channel::bounded(EVENT_BUFFER);
        self.subscribers.push(tx);
        rx
    }

    /// Deliver to every live subscriber without blocking.
    ///
    /// Dropped receivers are forgotten. A subscriber whose buffer is full
    /// is disconnected: it sees the buffered events, then a closed channel.
    pub fn publish(&mut self, event: &EngineEvent) {
        if self.subscribers.is_empty() {
            return;
        }
        self.subscribers.retain(|tx| match tx.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!(
                    "event subscriber fell {} events behind, disconnecting",
                    EVENT_BUFFER
                );
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
    }

    /// Number of live subscribers as of the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
