//! Timer-driven slot advancement (play/pause).
//!
//! Each tick locks the shared engine, runs `advance_one_slot` to completion
//! and releases the lock before awaiting the next tick, so ticks never
//! overlap with each other or with client operations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::simulation::MIN_TICK_MS;
use crate::runtime::{SharedEngine, Spawn};

/// Auto-advance driver for a shared engine.
pub struct SlotTicker<S: Spawn> {
    engine: SharedEngine,
    spawner: S,
    stop: Option<watch::Sender<bool>>,
    ticks: Arc<AtomicU64>,
}

impl<S: Spawn> SlotTicker<S> {
    /// Idle ticker for `engine`.
    pub fn new(engine: SharedEngine, spawner: S) -> Self {
        Self {
            engine,
            spawner,
            stop: None,
            ticks: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start advancing every `tick_ms` milliseconds (minimum 50).
    ///
    /// The first advance happens one period after the call. Calling `play`
    /// while playing restarts the timer with the new period.
    pub fn play(&mut self, tick_ms: u64) {
        self.pause();
        let period = Duration::from_millis(tick_ms.max(MIN_TICK_MS));
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let engine = Arc::clone(&self.engine);
        let ticks = Arc::clone(&self.ticks);

        self.spawner.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        engine.lock().advance_one_slot();
                        ticks.fetch_add(1, Ordering::Relaxed);
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!("slot ticker stopped");
        });

        tracing::info!("slot ticker playing every {:?}", period);
        self.stop = Some(stop_tx);
    }

    /// Stop advancing. A tick already running finishes first.
    pub fn pause(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(true);
            tracing::info!("slot ticker paused");
        }
    }

    /// Whether a timer is active.
    pub const fn is_playing(&self) -> bool {
        self.stop.is_some()
    }

    /// Ticks completed across every play session.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// The engine being driven.
    pub const fn engine(&self) -> &SharedEngine {
        &self.engine
    }
}

impl<S: Spawn> Drop for SlotTicker<S> {
    fn drop(&mut self) {
        self.pause();
    }
}
