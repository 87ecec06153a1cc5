//! # Saving-Ideas Host Runtime
//!
//! Process-startup composition: the environment is classified, layered
//! configuration resolved, every capability registered and the composition
//! graph finalized before the host accepts any work.
//!
//! ## Modules
//!
//! - `settings` - typed `SavingIdeaSettings` bound from configuration
//! - `persistence` - persistence options and the scoped data context
//! - `encoding` - text codecs, with legacy code pages behind a switch
//! - `ports` / `adapters` - repository and analytics contracts with defaults
//! - `capabilities` - the published capability catalogue
//! - `wiring` - registration of all capabilities on the graph
//! - `startup` - the orchestrator and process-wide publication

pub mod adapters;
pub mod capabilities;
pub mod encoding;
pub mod errors;
pub mod persistence;
pub mod ports;
pub mod settings;
pub mod startup;
pub mod wiring;

pub use errors::{EncodingError, StartupError};
pub use persistence::{PersistenceContextOptions, QueryTrackingBehavior, SavingIdeaDataContext};
pub use settings::SavingIdeaSettings;
pub use startup::{published, release, ReadyHost, Startup, StartupOptions, StartupStage};
