//! Conditional feature gate
//!
//! Pure functions from an environment label to behavior switches.

use super::environment::{EnvironmentLabel, DEVELOPMENT, PRODUCTION, STAGING};

pub fn is_environment(label: &EnvironmentLabel, name: &str) -> bool {
    label.matches(name)
}

pub fn is_development(label: &EnvironmentLabel) -> bool {
    is_environment(label, DEVELOPMENT)
}

pub fn is_staging(label: &EnvironmentLabel) -> bool {
    is_environment(label, STAGING)
}

pub fn is_production(label: &EnvironmentLabel) -> bool {
    is_environment(label, PRODUCTION)
}

/// Switches consulted while registering environment-sensitive components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSwitches {
    /// Verbose persistence logging that may include parameter values
    pub sensitive_data_logging: bool,
    /// Extended text encodings (legacy code pages); on for every label
    pub extended_text_encodings: bool,
}

impl FeatureSwitches {
    pub fn for_environment(label: &EnvironmentLabel) -> Self {
        Self {
            sensitive_data_logging: is_development(label),
            extended_text_encodings: true,
        }
    }
}
