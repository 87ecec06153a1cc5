//! Outbound Ports (Driven Ports / SPI)
//!
//! Everything the resolver reads from outside the process: configuration
//! layers and host identity.

use crate::domain::errors::ConfigError;
use crate::domain::tree::ConfigSection;
use std::path::PathBuf;

/// An ordered, named origin of configuration data.
pub trait ConfigurationSource: Send + Sync {
    /// Name used in diagnostics and provenance.
    fn name(&self) -> &str;

    /// Precedence rank. Higher ranks override lower ones.
    fn rank(&self) -> u32;

    /// Absence of an optional source is not an error.
    fn is_optional(&self) -> bool {
        true
    }

    /// Load the layer. `Ok(None)` means the source is absent.
    fn load(&self) -> Result<Option<ConfigSection>, ConfigError>;
}

/// Process-level facts about the host.
///
/// All environment access goes through this port.
pub trait HostEnvironment: Send + Sync {
    /// A single environment variable.
    fn var(&self, name: &str) -> Option<String>;

    /// Every environment variable, in any order.
    fn vars(&self) -> Vec<(String, String)>;

    /// Machine name, if it can be determined.
    fn host_name(&self) -> Option<String>;

    /// Directory configuration files are looked up in.
    fn working_directory(&self) -> PathBuf;
}
