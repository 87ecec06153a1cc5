//! Configuration Layer Resolver
//!
//! Merges ordered layers into one `ResolvedConfiguration`:
//! 1. Sort sources by rank (stable, so equal ranks keep insertion order)
//! 2. Load each source; absent optional sources are skipped
//! 3. Deep-merge every loaded layer over the previous ones
//!
//! Any load failure aborts resolution.

use crate::adapters::{EnvironmentVariablesSource, JsonFileSource};
use crate::domain::environment::EnvironmentLabel;
use crate::domain::errors::ConfigError;
use crate::domain::resolved::{ResolvedConfiguration, SourceReport, SourceStatus};
use crate::domain::tree::ConfigSection;
use crate::ports::outbound::{ConfigurationSource, HostEnvironment};
use std::path::PathBuf;
use tracing::{debug, info};

/// Rank of the base file.
pub const BASE_RANK: u32 = 0;
/// Rank of the host-name-qualified file.
pub const HOST_RANK: u32 = 10;
/// Rank of the environment-qualified file.
pub const ENVIRONMENT_RANK: u32 = 20;
/// Rank of process environment variables.
pub const ENVIRONMENT_VARIABLES_RANK: u32 = 30;

/// Default configuration file stem.
pub const DEFAULT_FILE_STEM: &str = "appsettings";

/// Merge `sources` in precedence order.
pub fn resolve(sources: &[Box<dyn ConfigurationSource>]) -> Result<ResolvedConfiguration, ConfigError> {
    let mut ordered: Vec<&dyn ConfigurationSource> = sources.iter().map(|s| s.as_ref()).collect();
    ordered.sort_by_key(|s| s.rank());

    let mut root = ConfigSection::new();
    let mut reports = Vec::with_capacity(ordered.len());

    for source in ordered {
        let status = match source.load()? {
            Some(layer) => {
                debug!(source = source.name(), rank = source.rank(), keys = layer.len(), "Merging configuration layer");
                root.merge(layer);
                SourceStatus::Loaded
            }
            None if source.is_optional() => {
                debug!(source = source.name(), "Optional configuration source absent, skipping");
                SourceStatus::Skipped
            }
            None => {
                return Err(ConfigError::SourceMissing {
                    source_name: source.name().to_string(),
                })
            }
        };
        reports.push(SourceReport {
            name: source.name().to_string(),
            rank: source.rank(),
            status,
        });
    }

    let loaded = reports
        .iter()
        .filter(|r| r.status == SourceStatus::Loaded)
        .count();
    info!(
        sources = reports.len(),
        loaded,
        top_level_keys = root.len(),
        "Configuration resolved"
    );

    Ok(ResolvedConfiguration::new(root, reports))
}

/// Where the standard layers live and how they are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLayout {
    pub base_directory: PathBuf,
    pub file_stem: String,
    /// Only variables with this prefix are applied (prefix stripped)
    pub environment_prefix: Option<String>,
}

impl SourceLayout {
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: base_directory.into(),
            file_stem: DEFAULT_FILE_STEM.to_string(),
            environment_prefix: None,
        }
    }

    /// Layout rooted at the host's working directory.
    pub fn for_host(host: &dyn HostEnvironment) -> Self {
        Self::new(host.working_directory())
    }

    pub fn with_file_stem(mut self, stem: impl Into<String>) -> Self {
        self.file_stem = stem.into();
        self
    }

    pub fn with_environment_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.environment_prefix = Some(prefix.into());
        self
    }

    pub fn base_file(&self) -> PathBuf {
        self.base_directory.join(format!("{}.json", self.file_stem))
    }

    /// `<stem>.<hostname>.json`, host name lowercased.
    pub fn host_file(&self, host_name: &str) -> PathBuf {
        self.base_directory
            .join(format!("{}.{}.json", self.file_stem, host_name.to_lowercase()))
    }

    /// `<stem>.<environment>.json`, label as-is.
    pub fn environment_file(&self, environment: &EnvironmentLabel) -> PathBuf {
        self.base_directory
            .join(format!("{}.{}.json", self.file_stem, environment.as_str()))
    }

    /// The four standard layers, lowest precedence first. The host layer is
    /// left out when the machine name is unknown.
    pub fn standard_sources(
        &self,
        host: &dyn HostEnvironment,
        environment: &EnvironmentLabel,
    ) -> Vec<Box<dyn ConfigurationSource>> {
        let mut sources: Vec<Box<dyn ConfigurationSource>> =
            vec![Box::new(JsonFileSource::new(self.base_file(), BASE_RANK))];

        match host.host_name() {
            Some(name) => sources.push(Box::new(JsonFileSource::new(
                self.host_file(&name),
                HOST_RANK,
            ))),
            None => debug!("Host name unavailable, skipping host-specific configuration"),
        }

        sources.push(Box::new(JsonFileSource::new(
            self.environment_file(environment),
            ENVIRONMENT_RANK,
        )));

        let mut variables = EnvironmentVariablesSource::from_host(host, ENVIRONMENT_VARIABLES_RANK);
        if let Some(prefix) = &self.environment_prefix {
            variables = variables.with_prefix(prefix.clone());
        }
        sources.push(Box::new(variables));

        sources
    }
}

/// Collects sources and resolves them once.
#[derive(Default)]
pub struct ConfigurationResolver {
    sources: Vec<Box<dyn ConfigurationSource>>,
}

impl ConfigurationResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver over the standard layers of `layout`.
    pub fn standard(
        layout: &SourceLayout,
        host: &dyn HostEnvironment,
        environment: &EnvironmentLabel,
    ) -> Self {
        Self {
            sources: layout.standard_sources(host, environment),
        }
    }

    pub fn with_source(mut self, source: impl ConfigurationSource + 'static) -> Self {
        self.add_source(Box::new(source));
        self
    }

    pub fn add_source(&mut self, source: Box<dyn ConfigurationSource>) {
        self.sources.push(source);
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn resolve(&self) -> Result<ResolvedConfiguration, ConfigError> {
        resolve(&self.sources)
    }
}
