//! # Startup Orchestrator
//!
//! Runs the composition stages in a fixed order, once per process:
//!
//! 1. **Classify** the environment label
//! 2. **Resolve** layered configuration
//! 3. **Register** settings, persistence, repository and analytics capabilities
//! 4. **Finalize** the composition graph (validation, eager singletons)
//! 5. **Publish** the ready registry for the request-handling layer
//!
//! Any failure aborts startup. Nothing is published until every stage has
//! succeeded.

use crate::errors::StartupError;
use crate::settings::SavingIdeaSettings;
use crate::wiring;
use host_config::{
    ConfigurationResolver, EnvironmentClassifier, EnvironmentLabel, FeatureSwitches, FromConfiguration,
    HostEnvironment, ResolvedConfiguration, SourceLayout, SourceStatus, DEFAULT_ENVIRONMENT_VARIABLE,
};
use host_telemetry::metrics::{
    record_configuration_sources, record_environment, record_registrations, record_singletons,
    record_stage_failure, StageTimer,
};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use service_graph::{CompositionGraph, Lifetime, ServiceRegistry};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

static STARTED: AtomicBool = AtomicBool::new(false);
static PUBLISHED: Lazy<RwLock<Option<ReadyHost>>> = Lazy::new(|| RwLock::new(None));

/// Startup stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupStage {
    Classify,
    Resolve,
    Register,
    Finalize,
    Publish,
}

impl StartupStage {
    pub const ALL: [StartupStage; 5] = [
        Self::Classify,
        Self::Resolve,
        Self::Register,
        Self::Finalize,
        Self::Publish,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Classify => "classify",
            Self::Resolve => "resolve",
            Self::Register => "register",
            Self::Finalize => "finalize",
            Self::Publish => "publish",
        }
    }
}

impl fmt::Display for StartupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct StartupOptions {
    /// Variable holding the environment label
    pub environment_variable: String,
    /// Configuration layout; defaults to the host's working directory
    pub layout: Option<SourceLayout>,
}

impl Default for StartupOptions {
    fn default() -> Self {
        Self {
            environment_variable: DEFAULT_ENVIRONMENT_VARIABLE.to_string(),
            layout: None,
        }
    }
}

/// Everything the request-handling layer needs, after a successful startup.
#[derive(Debug, Clone)]
pub struct ReadyHost {
    environment: EnvironmentLabel,
    switches: FeatureSwitches,
    configuration: Arc<ResolvedConfiguration>,
    registry: Arc<ServiceRegistry>,
}

impl ReadyHost {
    pub fn environment(&self) -> &EnvironmentLabel {
        &self.environment
    }

    pub fn switches(&self) -> FeatureSwitches {
        self.switches
    }

    pub fn configuration(&self) -> &Arc<ResolvedConfiguration> {
        &self.configuration
    }

    pub fn registry(&self) -> &Arc<ServiceRegistry> {
        &self.registry
    }
}

pub struct Startup<H: HostEnvironment> {
    host: H,
    options: StartupOptions,
}

impl<H: HostEnvironment> Startup<H> {
    pub fn new(host: H, options: StartupOptions) -> Self {
        Self { host, options }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Run stages 1-4 and return the composed host without publishing it.
    #[instrument(name = "startup_compose", skip(self))]
    pub fn compose(&self) -> Result<ReadyHost, StartupError> {
        let environment = self.stage(StartupStage::Classify, || Ok(self.classify()))?;
        let switches = FeatureSwitches::for_environment(&environment);

        let configuration = self.stage(StartupStage::Resolve, || self.resolve(&environment))?;
        let configuration = Arc::new(configuration);

        let mut graph = self.stage(StartupStage::Register, || self.register(&configuration, switches))?;
        let registry = self.stage(StartupStage::Finalize, || Ok(graph.finalize()?))?;

        record_environment(environment.as_str());
        for lifetime in Lifetime::ALL {
            record_registrations(lifetime.as_str(), registry.count_by_lifetime(lifetime));
        }
        record_singletons(registry.singletons().len());

        Ok(ReadyHost {
            environment,
            switches,
            configuration,
            registry: Arc::new(registry),
        })
    }

    /// Compose and publish process-wide. Fails with `AlreadyStarted` on any
    /// call after the first, including after a failed first attempt.
    pub fn run_once(&self) -> Result<ReadyHost, StartupError> {
        if STARTED.swap(true, Ordering::SeqCst) {
            return Err(StartupError::AlreadyStarted);
        }

        let ready = self.compose()?;
        self.stage(StartupStage::Publish, || {
            *PUBLISHED.write() = Some(ready.clone());
            Ok(())
        })?;

        info!(
            environment = %ready.environment,
            registrations = ready.registry.len(),
            singletons = ready.registry.singletons().len(),
            "Host ready"
        );
        Ok(ready)
    }

    fn classify(&self) -> EnvironmentLabel {
        let environment = EnvironmentClassifier::new(self.options.environment_variable.clone()).classify(&self.host);
        info!(environment = %environment, "Environment classified");
        environment
    }

    fn resolve(&self, environment: &EnvironmentLabel) -> Result<ResolvedConfiguration, StartupError> {
        let layout = match &self.options.layout {
            Some(layout) => layout.clone(),
            None => SourceLayout::for_host(&self.host),
        };
        let configuration = ConfigurationResolver::standard(&layout, &self.host, environment).resolve()?;

        let loaded = configuration
            .sources()
            .iter()
            .filter(|s| s.status == SourceStatus::Loaded)
            .count();
        record_configuration_sources(loaded, configuration.sources().len() - loaded);
        Ok(configuration)
    }

    fn register(
        &self,
        configuration: &Arc<ResolvedConfiguration>,
        switches: FeatureSwitches,
    ) -> Result<CompositionGraph, StartupError> {
        let settings = SavingIdeaSettings::from_configuration(configuration)?;
        let mut graph = CompositionGraph::new(configuration.clone());
        wiring::register_all(&mut graph, settings, switches)?;
        info!(registrations = graph.len(), "Capabilities registered");
        Ok(graph)
    }

    fn stage<T>(
        &self,
        stage: StartupStage,
        run: impl FnOnce() -> Result<T, StartupError>,
    ) -> Result<T, StartupError> {
        let _timer = StageTimer::start(stage.as_str());
        debug!(stage = %stage, "Startup stage started");

        run().map_err(|e| {
            record_stage_failure(stage.as_str());
            error!(stage = %stage, error = %e, "Startup aborted");
            e
        })
    }
}

/// The host published by `run_once`, if any.
pub fn published() -> Option<ReadyHost> {
    PUBLISHED.read().clone()
}

/// Withdraw the published host at shutdown.
pub fn release() -> Option<ReadyHost> {
    let released = PUBLISHED.write().take();
    if released.is_some() {
        info!("Published host released");
    }
    released
}
