//! Simulation configuration structures.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default number of slots in the horizon.
pub const DEFAULT_SLOT_COUNT: usize = 60;
/// Default CU budget per slot.
pub const DEFAULT_SLOT_CAPACITY: u64 = 48_000;
/// Default external load share when enabled.
pub const DEFAULT_EXTERNAL_PERCENT: u32 = 50;
/// Default auto-advance interval.
pub const DEFAULT_TICK_MS: u64 = 500;
/// Fastest auto-advance interval the ticker accepts.
pub const MIN_TICK_MS: u64 = 50;

/// External congestion settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalLoadConfig {
    /// Inject load on every advance.
    pub enabled: bool,
    /// Share of slot capacity, 0..=100.
    pub percent: u32,
}

impl Default for ExternalLoadConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            percent: DEFAULT_EXTERNAL_PERCENT,
        }
    }
}

/// Root simulation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Slots in the rolling horizon.
    pub slot_count: usize,
    /// CU budget per slot.
    pub slot_capacity: u64,
    /// External congestion.
    pub external_load: ExternalLoadConfig,
    /// Suppress cross-group priority reordering in the JIT backlog.
    pub group_preserving: bool,
    /// Auto-advance interval in milliseconds.
    pub tick_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            slot_count: DEFAULT_SLOT_COUNT,
            slot_capacity: DEFAULT_SLOT_CAPACITY,
            external_load: ExternalLoadConfig::default(),
            group_preserving: false,
            tick_ms: DEFAULT_TICK_MS,
        }
    }
}

impl SimulationConfig {
    /// Set the horizon length.
    #[must_use]
    pub const fn with_slot_count(mut self, slot_count: usize) -> Self {
        self.slot_count = slot_count;
        self
    }

    /// Set the per-slot capacity.
    #[must_use]
    pub const fn with_slot_capacity(mut self, slot_capacity: u64) -> Self {
        self.slot_capacity = slot_capacity;
        self
    }

    /// Set external load.
    #[must_use]
    pub const fn with_external_load(mut self, enabled: bool, percent: u32) -> Self {
        self.external_load = ExternalLoadConfig { enabled, percent };
        self
    }

    /// Set group-preserving ordering.
    #[must_use]
    pub const fn with_group_preserving(mut self, enabled: bool) -> Self {
        self.group_preserving = enabled;
        self
    }

    /// Set the auto-advance interval.
    #[must_use]
    pub const fn with_tick_ms(mut self, tick_ms: u64) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.slot_count == 0 {
            return Err("slot_count must be greater than 0".into());
        }
        if self.slot_capacity == 0 {
            return Err("slot_capacity must be greater than 0".into());
        }
        if self.external_load.percent > 100 {
            return Err(format!(
                "external_load.percent must be within 0..=100, got {}",
                self.external_load.percent
            ));
        }
        if self.tick_ms == 0 {
            return Err("tick_ms must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from `SLOT_SIM_*` environment variables.
    ///
    /// A `.env` file is loaded first when present; a malformed one is an
    /// error. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, String> {
        skip_missing_env_file(dotenvy::dotenv().map(drop))?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Self::from_env`], loading the given env file instead of `.env`.
    pub fn from_env_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        skip_missing_env_file(dotenvy::from_path(path.as_ref()))?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = parse_var(&lookup, "SLOT_SIM_SLOT_COUNT")? {
            cfg.slot_count = v;
        }
        if let Some(v) = parse_var(&lookup, "SLOT_SIM_SLOT_CAPACITY")? {
            cfg.slot_capacity = v;
        }
        if let Some(v) = parse_var(&lookup, "SLOT_SIM_EXTERNAL_LOAD")? {
            cfg.external_load.enabled = v;
        }
        if let Some(v) = parse_var(&lookup, "SLOT_SIM_EXTERNAL_LOAD_PERCENT")? {
            cfg.external_load.percent = v;
        }
        if let Some(v) = parse_var(&lookup, "SLOT_SIM_GROUP_PRESERVING")? {
            cfg.group_preserving = v;
        }
        if let Some(v) = parse_var(&lookup, "SLOT_SIM_TICK_MS")? {
            cfg.tick_ms = v;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn skip_missing_env_file(result: dotenvy::Result<()>) -> Result<(), String> {
    match result {
        Err(e) if !e.not_found() => Err(format!("env file: {e}")),
        _ => Ok(()),
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| format!("{key}: cannot parse `{raw}`: {e}"))
        })
        .transpose()
}
