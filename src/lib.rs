//! # Slot Orchestrator
//!
//! A fixed-horizon, slot-based capacity scheduler.
//!
//! The engine keeps a rolling window of discrete slots, each with a finite
//! budget of compute units (CU). Transactions are admitted either by
//! ahead-of-time reservation or by just-in-time greedy placement, and the
//! window scrolls forward one slot per tick.
//!
//! ## Core Problem Solved
//!
//! Blockspace-style capacity is perishable: a slot that passes unused is
//! gone, and two very different clients compete for it.
//!
//! - **AOT reservations** pick a target slot in advance and walk forward to
//!   their deadline. A reservation that cannot be met is abandoned.
//! - **JIT transactions** wait in a backlog that is re-packed, highest
//!   priority first, on every new arrival and every tick.
//! - **External load** models congestion the scheduler does not control by
//!   reserving a share of every visible slot.
//!
//! ## Key Features
//!
//! - **Single-owner state**: one [`core::SlotEngine`] holds the window,
//!   ledger, backlog, registry and retry counter
//! - **Deadline-bounded walks**: every placement attempt is bounded by the
//!   transaction's inclusive deadline slot
//! - **Group-preserving ordering**: optional backlog mode that never
//!   reorders transactions of different groups
//! - **Read model and export**: snapshots, metrics, CSV and JSON export
//! - **Auto-advance**: a tokio-driven ticker with play/pause
//!
//! ## Example
//!
//! ```rust
//! use slot_orchestrator::config::SimulationConfig;
//! use slot_orchestrator::core::{SlotEngine, TransactionRequest};
//!
//! let mut engine = SlotEngine::new(&SimulationConfig::default().with_slot_capacity(1000));
//! let first = engine.create_transaction(&TransactionRequest::jit(800, 3));
//! let second = engine.create_transaction(&TransactionRequest::jit(800, 3));
//!
//! assert_eq!(engine.transaction(first).unwrap().scheduled_slot, Some(0));
//! assert_eq!(engine.transaction(second).unwrap().scheduled_slot, Some(1));
//! assert_eq!(engine.total_retries(), 1);
//!
//! engine.advance_one_slot();
//! assert_eq!(engine.current_slot(), 1);
//! ```
//!
//! For complete scenarios, see `tests/slot_scheduler_test.rs`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Slot window, capacity ledger, admission policies and the engine.
pub mod core;
/// Configuration models for the engine and ticker.
pub mod config;
/// Builders to construct engines from configuration.
pub mod builders;
/// Snapshot exporters.
pub mod infra;
/// Request surface, scenarios and the auto-advance driver.
pub mod runtime;
/// Shared utilities.
pub mod util;
