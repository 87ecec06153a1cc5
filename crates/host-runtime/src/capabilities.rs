//! Capabilities published by the host
//!
//! | Capability | Lifetime | Depends on |
//! |------------|----------|------------|
//! | `saving-idea-settings` | Singleton (instance) | |
//! | `persistence-context-options` | Singleton | settings |
//! | `saving-idea-data-context` | Scoped | options |
//! | `saving-idea-repository` | Transient | data context |
//! | `audit-repository` | Transient | data context |
//! | `qlik-sense-app-data` | Singleton | settings |
//! | `qlik-sense-sheet-data` | Singleton | settings |
//! | `qlik-sense-services` | Singleton | app data, sheet data |
//! | `text-encodings` | Singleton | |

use crate::encoding::TextEncodingSupport;
use crate::persistence::{PersistenceContextOptions, SavingIdeaDataContext};
use crate::ports::{AuditRepository, QlikSenseAppData, QlikSenseServices, QlikSenseSheetData, SavingIdeaRepository};
use crate::settings::SavingIdeaSettings;
use service_graph::Capability;

pub const SAVING_IDEA_SETTINGS: Capability<SavingIdeaSettings> = Capability::new("saving-idea-settings");

pub const PERSISTENCE_OPTIONS: Capability<PersistenceContextOptions> =
    Capability::new("persistence-context-options");

pub const DATA_CONTEXT: Capability<SavingIdeaDataContext> = Capability::new("saving-idea-data-context");

pub const SAVING_IDEA_REPOSITORY: Capability<dyn SavingIdeaRepository> = Capability::new("saving-idea-repository");

pub const AUDIT_REPOSITORY: Capability<dyn AuditRepository> = Capability::new("audit-repository");

pub const QLIK_SENSE_APP_DATA: Capability<dyn QlikSenseAppData> = Capability::new("qlik-sense-app-data");

pub const QLIK_SENSE_SHEET_DATA: Capability<dyn QlikSenseSheetData> = Capability::new("qlik-sense-sheet-data");

pub const QLIK_SENSE_SERVICES: Capability<dyn QlikSenseServices> = Capability::new("qlik-sense-services");

pub const TEXT_ENCODINGS: Capability<TextEncodingSupport> = Capability::new("text-encodings");
