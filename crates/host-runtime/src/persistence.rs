//! Persistence context descriptor and unit of work
//!
//! `PersistenceContextOptions` is built once per process from the settings,
//! the resolved configuration and the feature gate. Each request scope gets
//! its own `SavingIdeaDataContext` over those options.

use crate::settings::SavingIdeaSettings;
use host_config::{ConfigError, FeatureSwitches, ResolvedConfiguration};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Explicit switch for sensitive persistence logging. Overrides the gate.
pub const SENSITIVE_LOGGING_KEY: &str = "Logging:Sensitive";

/// Whether queries track the entities they return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryTrackingBehavior {
    TrackAll,
    #[default]
    NoTracking,
}

impl fmt::Display for QueryTrackingBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TrackAll => write!(f, "track-all"),
            Self::NoTracking => write!(f, "no-tracking"),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct PersistenceContextOptions {
    connection_string: String,
    query_tracking: QueryTrackingBehavior,
    sensitive_data_logging: bool,
}

impl PersistenceContextOptions {
    pub fn new(
        connection_string: impl Into<String>,
        query_tracking: QueryTrackingBehavior,
        sensitive_data_logging: bool,
    ) -> Self {
        Self {
            connection_string: connection_string.into(),
            query_tracking,
            sensitive_data_logging,
        }
    }

    /// Options for this process. Queries never track; sensitive logging
    /// follows `Logging:Sensitive` when set, the feature gate otherwise.
    pub fn resolve(
        settings: &SavingIdeaSettings,
        configuration: &ResolvedConfiguration,
        switches: FeatureSwitches,
    ) -> Result<Self, ConfigError> {
        let sensitive_data_logging = configuration
            .get_bool(SENSITIVE_LOGGING_KEY)?
            .unwrap_or(switches.sensitive_data_logging);

        Ok(Self::new(
            settings.connection_strings.saving_idea_data_context.clone(),
            QueryTrackingBehavior::NoTracking,
            sensitive_data_logging,
        ))
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    pub fn query_tracking(&self) -> QueryTrackingBehavior {
        self.query_tracking
    }

    pub fn sensitive_data_logging(&self) -> bool {
        self.sensitive_data_logging
    }
}

// Connection strings carry credentials
impl fmt::Debug for PersistenceContextOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistenceContextOptions")
            .field("connection_string", &"<redacted>")
            .field("query_tracking", &self.query_tracking)
            .field("sensitive_data_logging", &self.sensitive_data_logging)
            .finish()
    }
}

/// One unit of work against the Saving-Ideas store.
///
/// Repositories resolved in the same scope share the context and therefore
/// its pending changes.
pub struct SavingIdeaDataContext {
    id: Uuid,
    options: Arc<PersistenceContextOptions>,
    pending: Mutex<Vec<String>>,
}

impl SavingIdeaDataContext {
    pub fn new(options: Arc<PersistenceContextOptions>) -> Self {
        Self {
            id: Uuid::new_v4(),
            options,
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn options(&self) -> &PersistenceContextOptions {
        &self.options
    }

    /// Queue a change description for the next save.
    pub fn track(&self, change: impl Into<String>) {
        self.pending.lock().push(change.into());
    }

    pub fn pending_changes(&self) -> Vec<String> {
        self.pending.lock().clone()
    }

    /// Drain the pending changes, returning how many there were.
    pub fn save_changes(&self) -> usize {
        let mut pending = self.pending.lock();
        let count = pending.len();
        pending.clear();
        count
    }
}

impl fmt::Debug for SavingIdeaDataContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SavingIdeaDataContext")
            .field("id", &self.id)
            .field("options", &self.options)
            .field("pending", &self.pending.lock().len())
            .finish()
    }
}
