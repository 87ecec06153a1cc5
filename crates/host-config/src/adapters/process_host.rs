//! Host environment adapters

use crate::ports::outbound::HostEnvironment;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The real process: `std::env` plus the machine name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessHost;

impl HostEnvironment for ProcessHost {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn vars(&self) -> Vec<(String, String)> {
        // Non-unicode variables cannot be configuration values
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    fn host_name(&self) -> Option<String> {
        hostname::get()
            .ok()
            .and_then(|name| name.into_string().ok())
            .filter(|name| !name.trim().is_empty())
    }

    fn working_directory(&self) -> PathBuf {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}

/// A fixed host description for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    vars: BTreeMap<String, String>,
    host_name: Option<String>,
    working_directory: PathBuf,
}

impl StaticHost {
    pub fn new(working_directory: impl Into<PathBuf>) -> Self {
        Self {
            working_directory: working_directory.into(),
            ..Self::default()
        }
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn with_host_name(mut self, host_name: impl Into<String>) -> Self {
        self.host_name = Some(host_name.into());
        self
    }
}

impl HostEnvironment for StaticHost {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn host_name(&self) -> Option<String> {
        self.host_name.clone()
    }

    fn working_directory(&self) -> PathBuf {
        self.working_directory.clone()
    }
}
