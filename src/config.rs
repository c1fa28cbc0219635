use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::OracleError;
use crate::oracle::{DEFAULT_BOUND, DEFAULT_EVENT_CAPACITY};

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OnePolicy {
    Composite,
    // legacy: slot 0 of the table is marked prime
    Prime,
}

impl OnePolicy {
    pub fn is_prime(self) -> bool {
        matches!(self, OnePolicy::Prime)
    }
}

impl Default for OnePolicy {
    fn default() -> Self {
        OnePolicy::Composite
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GrowthStrategy {
    Recompute,
    Segmented,
}

impl Default for GrowthStrategy {
    fn default() -> Self {
        GrowthStrategy::Recompute
    }
}

#[derive(Debug, Deserialize)]
struct ConfigToml {
    oracle: Option<OracleSection>,
}

#[derive(Debug, Deserialize)]
struct OracleSection {
    initial_bound: Option<i64>,
    one: Option<OnePolicy>,
    strategy: Option<GrowthStrategy>,
    event_capacity: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OracleConfig {
    pub initial_bound: i64,
    pub one: OnePolicy,
    pub strategy: GrowthStrategy,
    /// Oldest events are dropped past this many; 0 disables the log.
    pub event_capacity: usize,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            initial_bound: DEFAULT_BOUND,
            one: OnePolicy::default(),
            strategy: GrowthStrategy::default(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl OracleConfig {
    pub fn with_bound(initial_bound: i64) -> Self {
        Self {
            initial_bound,
            ..Self::default()
        }
    }

    pub fn one(mut self, one: OnePolicy) -> Self {
        self.one = one;
        self
    }

    pub fn strategy(mut self, strategy: GrowthStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn event_capacity(mut self, event_capacity: usize) -> Self {
        self.event_capacity = event_capacity;
        self
    }

    fn from_section(section: Option<OracleSection>) -> Self {
        let mut config = Self::default();
        if let Some(section) = section {
            if let Some(bound) = section.initial_bound {
                config.initial_bound = bound;
            }
            if let Some(one) = section.one {
                config.one = one;
            }
            if let Some(strategy) = section.strategy {
                config.strategy = strategy;
            }
            if let Some(capacity) = section.event_capacity {
                config.event_capacity = capacity;
            }
        }
        config
    }

    pub fn from_toml_str(content: &str) -> Result<Self, OracleError> {
        let parsed: ConfigToml =
            toml::from_str(content).map_err(|e| OracleError::Config(format!("cannot parse config: {}", e)))?;
        Ok(Self::from_section(parsed.oracle))
    }

    /// A missing file yields the default config.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OracleError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| OracleError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }
}
