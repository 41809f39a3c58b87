//! The slot engine: one struct owning every piece of run state.
//!
//! All mutation goes through the public operations below. Each one runs to
//! completion synchronously, so a driver that serializes calls (for example
//! behind a mutex) gets a single logical timeline without further locking.

use crossbeam_channel::Receiver;
use uuid::Uuid;

use crate::config::SimulationConfig;
use crate::core::admission::{AdmissionEngine, JitPass, Placement};
use crate::core::audit::{audit_engine_event, AuditSink};
use crate::core::events::{EngineEvent, EventBus};
use crate::core::ledger::{CapacityLedger, ExternalLoad};
use crate::core::registry::{Transaction, TransactionRegistry, TransactionRequest, TransactionStatus};
use crate::core::retry::RetryCounter;
use crate::core::slot_window::{Slot, SlotWindow};
use crate::core::snapshot::{EngineMetrics, EngineSnapshot, SlotView};
use crate::util::clock::now_ms;
use crate::util::serde::{AdmissionMode, SlotIndex, TxId};

/// Scheduler state for one simulation run.
pub struct SlotEngine {
    run_id: Uuid,
    window: SlotWindow,
    ledger: CapacityLedger,
    admission: AdmissionEngine,
    retries: RetryCounter,
    registry: TransactionRegistry,
    events: EventBus,
    audit: Option<Box<dyn AuditSink>>,
    audit_seq: u64,
}

impl Default for SlotEngine {
    fn default() -> Self {
        Self::new(&SimulationConfig::default())
    }
}

impl SlotEngine {
    /// Fresh run at slot 0.
    ///
    /// Out-of-range values are clamped rather than rejected; use
    /// [`crate::builders::EngineBuilder`] for validated construction.
    pub fn new(config: &SimulationConfig) -> Self {
        let ledger = CapacityLedger::new(
            config.slot_capacity,
            ExternalLoad::new(config.external_load.enabled, config.external_load.percent),
        );
        let mut engine = Self {
            run_id: Uuid::new_v4(),
            window: SlotWindow::new(config.slot_count),
            ledger,
            admission: AdmissionEngine::new(config.group_preserving),
            retries: RetryCounter::new(),
            registry: TransactionRegistry::new(),
            events: EventBus::new(),
            audit: None,
            audit_seq: 0,
        };
        engine.inject_external_load();
        tracing::info!(
            "slot engine started: {} slots x {} CU, run {}",
            engine.window.slot_count(),
            engine.ledger.capacity(),
            engine.run_id
        );
        engine
    }

    /// Attach an audit sink receiving every engine event.
    #[must_use]
    pub fn with_audit(mut self, audit: Box<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Receive every engine event from now on.
    ///
    /// The receiver buffers up to
    /// [`EVENT_BUFFER`](crate::core::events::EVENT_BUFFER) events. A
    /// subscriber that falls further behind is disconnected and must
    /// subscribe again.
    pub fn subscribe(&mut self) -> Receiver<EngineEvent> {
        self.events.subscribe()
    }

    fn emit(&mut self, event: EngineEvent) {
        if let Some(sink) = self.audit.as_mut() {
            self.audit_seq += 1;
            sink.record(audit_engine_event(
                &self.run_id.to_string(),
                self.audit_seq,
                &event,
            ));
        }
        self.events.publish(&event);
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Register a transaction and admit it under its policy.
    ///
    /// AOT is placed or abandoned immediately. JIT joins the backlog and the
    /// whole backlog is re-evaluated.
    pub fn create_transaction(&mut self, request: &TransactionRequest) -> TxId {
        let request = request.normalized();
        let id = self.registry.register(&request, self.window.current_slot());
        tracing::debug!(
            "tx {} created: {} CU, {} {}, group {}",
            id,
            request.cu,
            request.mode,
            request.priority,
            request.group
        );
        self.emit(EngineEvent::Created {
            id,
            mode: request.mode,
        });

        match request.mode {
            AdmissionMode::Aot => self.admit_aot(id, request.reserve_offset),
            AdmissionMode::Jit => {
                self.admission.enqueue(id);
                self.run_jit();
            }
        }
        id
    }

    fn admit_aot(&mut self, id: TxId, reserve_offset: i64) {
        let Some(tx) = self.registry.get_mut(id) else {
            return;
        };
        let mut placement = Placement {
            window: &mut self.window,
            ledger: &self.ledger,
            retries: &mut self.retries,
        };
        let outcome = AdmissionEngine::admit_aot(&mut placement, tx, reserve_offset);
        let retries = tx.retry_count;
        let event = match outcome {
            Some(slot) => {
                tracing::info!("aot tx {} reserved slot {}", id, slot);
                EngineEvent::Placed { id, slot, retries }
            }
            None => EngineEvent::Abandoned { id, retries },
        };
        self.emit(event);
    }

    fn run_jit(&mut self) -> JitPass {
        let mut placement = Placement {
            window: &mut self.window,
            ledger: &self.ledger,
            retries: &mut self.retries,
        };
        let pass = self.admission.run_jit(&mut placement, &mut self.registry);
        if !pass.placed.is_empty() {
            tracing::info!(
                "jit pass placed {} tx, {} left in backlog",
                pass.placed.len(),
                pass.remaining
            );
        }
        for &(id, slot) in &pass.placed {
            let retries = self.registry.get(id).map_or(0, |t| t.retry_count);
            self.emit(EngineEvent::Placed { id, slot, retries });
        }
        pass
    }

    fn inject_external_load(&mut self) {
        if let Some(per_slot) = self.ledger.inject_external_load(&mut self.window) {
            self.emit(EngineEvent::ExternalLoadInjected { per_slot });
        }
    }

    /// Move the window one slot forward, re-inject external load and
    /// re-run JIT placement over the backlog.
    pub fn advance_one_slot(&mut self) {
        if let Some(evicted) = self.window.advance() {
            tracing::debug!(
                "slot {} left the horizon with {} tx",
                evicted.index,
                evicted.transaction_ids.len()
            );
        }
        self.inject_external_load();
        if !self.admission.backlog().is_empty() {
            self.run_jit();
        }
        let current_slot = self.window.current_slot();
        let backlog = self.admission.backlog().len();
        tracing::info!("advanced to slot {} (backlog {})", current_slot, backlog);
        self.emit(EngineEvent::Advanced {
            current_slot,
            backlog,
        });
    }

    /// Clear the run back to slot 0 with no transactions and no retries.
    ///
    /// Capacity, external load and ordering settings are kept.
    pub fn reset(&mut self) {
        self.window.initialize();
        self.registry.clear();
        self.admission.clear();
        self.retries.reset();
        self.run_id = Uuid::new_v4();
        self.audit_seq = 0;
        tracing::info!("run reset, new run {}", self.run_id);
        self.inject_external_load();
        self.emit(EngineEvent::Reset);
    }

    /// Change the per-slot budget for subsequent admissions (minimum 1).
    pub fn set_capacity(&mut self, capacity: u64) {
        self.ledger.set_capacity(capacity);
        tracing::info!("slot capacity set to {}", self.ledger.capacity());
        self.emit(EngineEvent::ConfigChanged {
            setting: "capacity".into(),
        });
    }

    /// Change external load and re-inject it across the window at once.
    ///
    /// Disabling stops future injection; values already written remain on
    /// their slots until they scroll out.
    pub fn set_external_load(&mut self, enabled: bool, percent: u32) {
        self.ledger.set_external_load(enabled, percent);
        let load = self.ledger.external_load();
        tracing::info!(
            "external load {} at {}%",
            if load.enabled { "enabled" } else { "disabled" },
            load.percent
        );
        self.emit(EngineEvent::ConfigChanged {
            setting: "external_load".into(),
        });
        self.inject_external_load();
    }

    /// Toggle group-preserving backlog ordering for subsequent passes.
    pub fn set_group_preserving(&mut self, enabled: bool) {
        self.admission.set_group_preserving(enabled);
        tracing::info!("group-preserving ordering {}", enabled);
        self.emit(EngineEvent::ConfigChanged {
            setting: "group_preserving".into(),
        });
    }

    // ------------------------------------------------------------------
    // Read model
    // ------------------------------------------------------------------

    /// Identifier of the current run.
    pub const fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Absolute index of the current slot.
    pub const fn current_slot(&self) -> SlotIndex {
        self.window.current_slot()
    }

    /// Slots in the horizon.
    pub const fn slot_count(&self) -> usize {
        self.window.slot_count()
    }

    /// Per-slot CU budget.
    pub const fn capacity(&self) -> u64 {
        self.ledger.capacity()
    }

    /// External load setting.
    pub const fn external_load(&self) -> ExternalLoad {
        self.ledger.external_load()
    }

    /// Whether group-preserving ordering is active.
    pub const fn group_preserving(&self) -> bool {
        self.admission.group_preserving()
    }

    /// The rolling window.
    pub const fn window(&self) -> &SlotWindow {
        &self.window
    }

    /// Slot at an absolute index, `None` outside the horizon.
    pub fn slot_at(&self, index: SlotIndex) -> Option<&Slot> {
        self.window.slot_at(index)
    }

    /// Every transaction created this run.
    pub const fn registry(&self) -> &TransactionRegistry {
        &self.registry
    }

    /// Look up a transaction.
    pub fn transaction(&self, id: TxId) -> Option<&Transaction> {
        self.registry.get(id)
    }

    /// Unplaced JIT transaction ids.
    pub fn backlog(&self) -> &[TxId] {
        self.admission.backlog()
    }

    /// Failed placement steps this run.
    pub const fn total_retries(&self) -> u64 {
        self.retries.total()
    }

    /// `total used / (capacity * slot count)` across the window.
    #[allow(clippy::cast_precision_loss)]
    pub fn fill_rate(&self) -> f64 {
        let total_capacity = self.ledger.capacity() as f64 * self.window.slot_count() as f64;
        self.window.total_used() as f64 / total_capacity
    }

    /// Per-slot views from current to farthest.
    pub fn slot_views(&self) -> Vec<SlotView> {
        self.window
            .iter()
            .map(|slot| SlotView {
                index: slot.index,
                used: slot.used,
                external_used: slot.external_used,
                capacity: self.ledger.capacity(),
                available: self.ledger.available_in(slot),
                transaction_ids: slot.transaction_ids.clone(),
            })
            .collect()
    }

    /// Aggregate metrics.
    pub fn metrics(&self) -> EngineMetrics {
        let current_slot = self.window.current_slot();
        let count_status = |status: TransactionStatus| {
            self.registry.iter().filter(|t| t.status() == status).count()
        };
        let expired_backlog = self
            .admission
            .backlog()
            .iter()
            .filter_map(|&id| self.registry.get(id))
            .filter(|t| t.deadline_slot < current_slot)
            .count();
        EngineMetrics {
            current_slot,
            backlog_size: self.admission.backlog().len(),
            expired_backlog,
            fill_rate: self.fill_rate(),
            total_retries: self.retries.total(),
            transaction_count: self.registry.len(),
            scheduled_count: count_status(TransactionStatus::Scheduled),
            abandoned_count: count_status(TransactionStatus::Abandoned),
        }
    }

    /// Full read-only view for rendering or export.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            run_id: self.run_id,
            taken_at_ms: u64::try_from(now_ms()).unwrap_or(u64::MAX),
            capacity: self.ledger.capacity(),
            slots: self.slot_views(),
            transactions: self.registry.iter().cloned().collect(),
            metrics: self.metrics(),
        }
    }
}
