//! Environment labels
//!
//! The label is derived once at startup from a designated override variable
//! and is immutable afterward.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used when the override variable is unset or blank.
pub const DEFAULT_ENVIRONMENT: &str = "Production";

/// Variable consulted for the label unless the host overrides it.
pub const DEFAULT_ENVIRONMENT_VARIABLE: &str = "APP_ENVIRONMENT";

/// Well-known labels.
pub const DEVELOPMENT: &str = "Development";
pub const STAGING: &str = "Staging";
pub const PRODUCTION: &str = DEFAULT_ENVIRONMENT;

/// Runtime environment classification (case preserved).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnvironmentLabel(String);

impl EnvironmentLabel {
    /// Derive the label from the raw override value.
    pub fn from_override(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() => Self(v.to_string()),
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against another label name.
    pub fn matches(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

impl Default for EnvironmentLabel {
    fn default() -> Self {
        Self(DEFAULT_ENVIRONMENT.to_string())
    }
}

impl fmt::Display for EnvironmentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EnvironmentLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
