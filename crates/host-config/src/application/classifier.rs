//! Environment Classifier

use crate::domain::environment::{EnvironmentLabel, DEFAULT_ENVIRONMENT_VARIABLE};
use crate::ports::outbound::HostEnvironment;
use tracing::debug;

/// Derives the environment label from a designated override variable.
///
/// The host name never becomes the label; it only selects a configuration
/// layer.
#[derive(Debug, Clone)]
pub struct EnvironmentClassifier {
    variable: String,
}

impl EnvironmentClassifier {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Classify the current host. Never fails: an unset or blank override
    /// yields `Production`.
    pub fn classify(&self, host: &dyn HostEnvironment) -> EnvironmentLabel {
        let raw = host.var(&self.variable);
        let label = EnvironmentLabel::from_override(raw.as_deref());
        debug!(
            variable = %self.variable,
            overridden = raw.is_some(),
            environment = %label,
            "Classified environment"
        );
        label
    }
}

impl Default for EnvironmentClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_ENVIRONMENT_VARIABLE)
    }
}
