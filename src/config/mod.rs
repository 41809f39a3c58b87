//! Configuration models for the simulation engine and its driver.

pub mod simulation;

pub use simulation::{ExternalLoadConfig, SimulationConfig};
