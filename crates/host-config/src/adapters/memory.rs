//! In-memory configuration layer

use crate::domain::errors::ConfigError;
use crate::domain::tree::ConfigSection;
use crate::ports::outbound::ConfigurationSource;
use serde_json::Value;

/// A layer built from a JSON value. `None` models an absent source.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    rank: u32,
    value: Option<Value>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, rank: u32, value: Value) -> Self {
        Self {
            name: name.into(),
            rank,
            value: Some(value),
        }
    }

    pub fn absent(name: impl Into<String>, rank: u32) -> Self {
        Self {
            name: name.into(),
            rank,
            value: None,
        }
    }
}

impl ConfigurationSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn rank(&self) -> u32 {
        self.rank
    }

    fn load(&self) -> Result<Option<ConfigSection>, ConfigError> {
        self.value
            .clone()
            .map(|value| ConfigSection::from_json(&self.name, value))
            .transpose()
    }
}
