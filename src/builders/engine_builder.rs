//! Validated construction of a [`SlotEngine`] from configuration.

use crate::config::SimulationConfig;
use crate::core::{AuditSink, SchedulerError, SlotEngine};

/// Builder collecting configuration and optional collaborators.
pub struct EngineBuilder {
    config: SimulationConfig,
    audit: Option<Box<dyn AuditSink>>,
}

impl EngineBuilder {
    /// Start from a configuration.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config, audit: None }
    }

    /// Configuration the engine will be built from.
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Attach an audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Box<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Validate the configuration and construct the engine.
    pub fn build(self) -> Result<SlotEngine, SchedulerError> {
        self.config
            .validate()
            .map_err(SchedulerError::InvalidConfig)?;
        let engine = SlotEngine::new(&self.config);
        Ok(match self.audit {
            Some(audit) => engine.with_audit(audit),
            None => engine,
        })
    }
}

/// Parse a JSON configuration and build an engine from it.
pub fn build_engine(config_json: &str) -> Result<SlotEngine, SchedulerError> {
    let config = SimulationConfig::from_json_str(config_json).map_err(SchedulerError::InvalidConfig)?;
    EngineBuilder::new(config).build()
}
