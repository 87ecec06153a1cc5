//! Contracts of the collaborators published through the registry.

pub mod analytics;
pub mod repositories;

pub use analytics::{QlikSenseAppData, QlikSenseServices, QlikSenseSheetData};
pub use repositories::{AuditRepository, SavingIdeaRepository};
