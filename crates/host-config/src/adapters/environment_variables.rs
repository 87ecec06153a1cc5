//! Environment variable configuration layer
//!
//! Variables map to key paths with `__` (or `:`) as the section separator:
//! `Db__Timeout=90` sets `Db:Timeout`. Values are always strings.

use crate::domain::errors::ConfigError;
use crate::domain::key_path::KeyPath;
use crate::domain::tree::{ConfigSection, ConfigValue};
use crate::ports::outbound::{ConfigurationSource, HostEnvironment};

/// A snapshot of process environment variables.
#[derive(Debug, Clone)]
pub struct EnvironmentVariablesSource {
    vars: Vec<(String, String)>,
    prefix: Option<String>,
    rank: u32,
}

impl EnvironmentVariablesSource {
    pub fn new(vars: Vec<(String, String)>, rank: u32) -> Self {
        Self {
            vars,
            prefix: None,
            rank,
        }
    }

    /// Snapshot every variable visible to `host`.
    pub fn from_host(host: &dyn HostEnvironment, rank: u32) -> Self {
        Self::new(host.vars(), rank)
    }

    /// Only consider variables starting with `prefix` (ASCII case-insensitive),
    /// stripping it before mapping.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    fn strip_prefix<'a>(&self, name: &'a str) -> Option<&'a str> {
        match &self.prefix {
            None => Some(name),
            Some(prefix) => {
                let head = name.get(..prefix.len())?;
                head.eq_ignore_ascii_case(prefix)
                    .then(|| &name[prefix.len()..])
            }
        }
    }
}

impl ConfigurationSource for EnvironmentVariablesSource {
    fn name(&self) -> &str {
        "environment variables"
    }

    fn rank(&self) -> u32 {
        self.rank
    }

    fn load(&self) -> Result<Option<ConfigSection>, ConfigError> {
        // Sorted so the result is independent of enumeration order
        let mut vars: Vec<&(String, String)> = self.vars.iter().collect();
        vars.sort();

        let mut section = ConfigSection::new();
        for (name, value) in vars {
            let Some(stripped) = self.strip_prefix(name) else {
                continue;
            };
            let path = KeyPath::from_env_name(stripped);
            if path.is_root() {
                continue;
            }
            section.set(&path, ConfigValue::String(value.clone()));
        }
        Ok(Some(section))
    }
}
