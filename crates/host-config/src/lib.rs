//! # Host Configuration
//!
//! Environment classification and layered configuration resolution for
//! process startup.
//!
//! ## Architecture
//!
//! - **Domain**: environment labels, feature gate, configuration tree, resolved configuration
//! - **Ports**: outbound `ConfigurationSource` and `HostEnvironment`
//! - **Adapters**: JSON files, environment variables, in-memory layers, process host
//! - **Application**: `EnvironmentClassifier`, `ConfigurationResolver`
//!
//! ## Layers (lowest precedence first)
//!
//! 1. `appsettings.json`
//! 2. `appsettings.<hostname>.json`
//! 3. `appsettings.<environment>.json`
//! 4. process environment variables (`Db__Timeout` sets `Db:Timeout`)

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use adapters::{EnvironmentVariablesSource, JsonFileSource, MemorySource, ProcessHost, StaticHost};
pub use application::{resolve, ConfigurationResolver, EnvironmentClassifier, SourceLayout};
pub use domain::environment::{EnvironmentLabel, DEFAULT_ENVIRONMENT, DEFAULT_ENVIRONMENT_VARIABLE};
pub use domain::errors::ConfigError;
pub use domain::feature_gate::{is_development, is_environment, is_production, is_staging, FeatureSwitches};
pub use domain::key_path::KeyPath;
pub use domain::resolved::{FromConfiguration, ResolvedConfiguration, SourceReport, SourceStatus};
pub use domain::tree::{ConfigNode, ConfigSection, ConfigValue};
pub use ports::outbound::{ConfigurationSource, HostEnvironment};
